//! # API Shared
//!
//! Shared definitions for the SkillNaav assessment API.
//!
//! Contains:
//! - Request/response wire types (`models` module) with OpenAPI schemas
//! - Conversions between wire types and `skillnaav-core` records
//! - The shared `HealthService`

pub mod health;
pub mod models;

pub use health::HealthService;
pub use models::*;

//! # API REST
//!
//! REST API for the SkillNaav assessment generator.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status mapping, CORS)
//!
//! Uses `api-shared` for wire types and `skillnaav-core` for the pipeline itself.

#![warn(rust_2018_idioms)]

pub mod routes;

use skillnaav_core::{AssessmentService, OpenAiClient, UpstreamConfig};
use std::sync::Arc;

pub use routes::{router, ApiDoc};

/// Environment variable holding the full listen address.
pub const ENV_REST_ADDR: &str = "SKILLNAAV_REST_ADDR";

/// Environment variable holding only the listen port.
pub const ENV_PORT: &str = "PORT";

/// Port used when neither address nor port is configured.
pub const DEFAULT_PORT: u16 = 5000;

/// Application state shared across REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub assessment_service: AssessmentService,
}

impl AppState {
    /// Wires an [`OpenAiClient`] built from `cfg` into the assessment service.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(cfg: UpstreamConfig) -> anyhow::Result<Self> {
        let client = OpenAiClient::new(Arc::new(cfg))?;
        Ok(Self {
            assessment_service: AssessmentService::new(Arc::new(client)),
        })
    }
}

/// Resolve the listen address: an explicit address wins, then a bare port, then the default.
pub fn rest_addr_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> String {
    if let Some(addr) = lookup(ENV_REST_ADDR).filter(|v| !v.trim().is_empty()) {
        return addr.trim().to_string();
    }
    let port = lookup(ENV_PORT)
        .and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    format!("0.0.0.0:{port}")
}

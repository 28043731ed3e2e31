//! # SkillNaav Core
//!
//! Core logic for the SkillNaav assessment generator.
//!
//! The pipeline is linear and request-scoped:
//! - [`prompt`] builds the instruction for a validated [`GenerationRequest`]
//! - [`generation`] sends it to the external text-generation service
//! - [`parser`] turns the raw reply into [`ParsedQuestion`] records
//! - [`scoring`] compares submitted answers with the correct ones
//!
//! **No API concerns**: HTTP servers, routing and wire formats belong in `api-rest` and
//! `api-shared`.

pub mod assessment;
pub mod config;
pub mod constants;
pub mod error;
pub mod generation;
pub mod parser;
pub mod prompt;
pub mod scoring;
pub mod validation;

pub use assessment::{Assessment, AssessmentService};
pub use config::UpstreamConfig;
pub use error::{AssessmentError, AssessmentResult, UpstreamError, ValidationError};
pub use generation::{GenerationClient, OpenAiClient};
pub use parser::{parse_assessment, render_assessment, ParsedQuestion};
pub use prompt::{build_prompt, build_prompt_parts};
pub use scoring::{
    answers_match, score_keyed, score_questions, AnswerMap, KeyedAnswers, KeyedScore,
    QuestionReview, ScoreResult,
};
pub use validation::GenerationRequest;

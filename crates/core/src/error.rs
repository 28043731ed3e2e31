use std::time::Duration;

/// A generation request field was absent or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid difficulty: {0}")]
    InvalidDifficulty(skillnaav_types::TypeError),
    #[error("invalid duration: {0}")]
    InvalidDuration(skillnaav_types::TypeError),
}

impl ValidationError {
    /// True when the error reports an absent field rather than a malformed one.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, ValidationError::MissingField(_))
    }
}

/// The text-generation service could not produce a completion.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(reqwest::Error),
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode upstream response: {0}")]
    Decode(reqwest::Error),
    #[error("upstream response contained no completion text")]
    EmptyCompletion,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("generation failed: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type AssessmentResult<T> = std::result::Result<T, AssessmentError>;

//! Input validation for assessment generation.
//!
//! A [`GenerationRequest`] can only be built from inputs that pass these checks, so the
//! prompt builder and the generation client never see an absent or malformed field.

use crate::ValidationError;
use skillnaav_types::{Difficulty, DurationMinutes, NonEmptyText};

/// A validated request to generate one assessment. Consumed once per submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GenerationRequest {
    pub topic: NonEmptyText,
    pub difficulty: Difficulty,
    pub duration: DurationMinutes,
}

impl GenerationRequest {
    pub fn new(topic: NonEmptyText, difficulty: Difficulty, duration: DurationMinutes) -> Self {
        Self {
            topic,
            difficulty,
            duration,
        }
    }

    /// Builds a request from raw, possibly absent, field values.
    ///
    /// Presence is checked for all three fields before any of them is parsed, so a
    /// request missing a field always reports `MissingField` even if another field is
    /// also malformed.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if:
    /// - any field is absent or blank (`MissingField`),
    /// - the difficulty is not easy, medium or hard,
    /// - the duration is not a positive whole number of minutes.
    pub fn from_parts(
        topic: Option<&str>,
        difficulty: Option<&str>,
        duration: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let topic = required("topic", topic)?;
        let difficulty = required("difficulty", difficulty)?;
        let duration = required("duration", duration)?;

        let topic = NonEmptyText::new(topic).map_err(|_| ValidationError::MissingField("topic"))?;
        let difficulty = difficulty
            .parse::<Difficulty>()
            .map_err(ValidationError::InvalidDifficulty)?;
        let duration = duration
            .parse::<DurationMinutes>()
            .map_err(ValidationError::InvalidDuration)?;

        Ok(Self::new(topic, difficulty, duration))
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

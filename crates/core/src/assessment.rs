//! Assessment orchestration: prompt, generate, parse.

use crate::constants::QUESTION_COUNT;
use crate::generation::GenerationClient;
use crate::parser::{parse_assessment, ParsedQuestion};
use crate::prompt::build_prompt;
use crate::validation::GenerationRequest;
use crate::AssessmentResult;
use std::sync::Arc;

/// A generated assessment: the upstream text and the questions recovered from it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Assessment {
    pub raw: String,
    pub questions: Vec<ParsedQuestion>,
}

/// Runs the generation pipeline for one request at a time.
///
/// Holds no per-request state, so a single instance can be shared across concurrent
/// handlers.
#[derive(Clone)]
pub struct AssessmentService {
    client: Arc<dyn GenerationClient>,
}

impl AssessmentService {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Builds the prompt for `request` and returns the upstream's raw text.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Upstream` if the generation call fails. There is no retry.
    pub async fn generate(&self, request: &GenerationRequest) -> AssessmentResult<String> {
        let prompt = build_prompt(request);
        tracing::info!(
            topic = %request.topic,
            difficulty = %request.difficulty,
            duration = request.duration.get(),
            "generating assessment"
        );

        match self.client.generate(&prompt).await {
            Ok(text) => {
                tracing::info!(chars = text.len(), "assessment generated");
                Ok(text)
            }
            Err(e) => {
                tracing::error!("assessment generation failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Generates an assessment and parses it into questions.
    ///
    /// Blocks the parser cannot use are dropped, so the result may hold fewer than
    /// [`QUESTION_COUNT`] questions; that is logged, not reported as an error.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Upstream` if the generation call fails.
    pub async fn generate_parsed(&self, request: &GenerationRequest) -> AssessmentResult<Assessment> {
        let raw = self.generate(request).await?;
        let questions = parse_assessment(&raw);
        if questions.len() < QUESTION_COUNT {
            tracing::warn!(
                parsed = questions.len(),
                requested = QUESTION_COUNT,
                "generated text yielded fewer questions than requested"
            );
        }
        Ok(Assessment { raw, questions })
    }
}

//! Prompt construction for assessment generation.

use crate::constants::{CORRECT_ANSWER_MARKER, OPTIONS_PER_QUESTION, QUESTION_COUNT};
use crate::validation::GenerationRequest;
use crate::AssessmentResult;

/// Builds the instruction sent to the text-generation service.
///
/// The output is deterministic for a given request and describes the exact block layout
/// that [`crate::parser::parse_assessment`] expects back.
pub fn build_prompt(request: &GenerationRequest) -> String {
    format!(
        "Create a {difficulty} level assessment on the topic \"{topic}\" for {duration} minutes.\n\
Provide {count} multiple-choice questions with {options} options each (labeled a, b, c, d). \
Include the correct answer for each question as follows:\n\
Question 1: [question text]\n\
a. [option 1]\n\
b. [option 2]\n\
c. [option 3]\n\
d. [option 4]\n\
{marker} [correct option letter]\n\
\n\
Format the output exactly as specified, with each question followed by the correct answer.",
        difficulty = request.difficulty,
        topic = request.topic,
        duration = request.duration,
        count = QUESTION_COUNT,
        options = OPTIONS_PER_QUESTION,
        marker = CORRECT_ANSWER_MARKER,
    )
}

/// Validates raw field values and builds the prompt from them.
///
/// # Errors
///
/// Returns `AssessmentError::Validation` if any part is blank or malformed.
pub fn build_prompt_parts(topic: &str, difficulty: &str, duration: &str) -> AssessmentResult<String> {
    let request = GenerationRequest::from_parts(Some(topic), Some(difficulty), Some(duration))?;
    Ok(build_prompt(&request))
}

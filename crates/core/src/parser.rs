//! Best-effort parser for generated assessment text.
//!
//! The generator is asked for blocks of the form
//!
//! ```text
//! Question 1: What is 2 + 2?
//! a. 3
//! b. 4
//! c. 5
//! d. 6
//! Correct Answer: b
//! ```
//!
//! separated by blank lines, but nothing guarantees it complies. Parsing therefore never
//! fails: blocks that do not carry a question, at least one option and a correct-answer
//! line are dropped, and the caller may receive fewer questions than it asked for.

use crate::constants::CORRECT_ANSWER_MARKER;
use serde::{Deserialize, Serialize};

/// One multiple-choice question recovered from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Token after `Correct Answer:`, normally a bare option letter.
    pub correct_answer: String,
    /// The option text that `correct_answer` refers to, when it can be resolved.
    #[serde(default)]
    pub correct_option: Option<String>,
}

impl ParsedQuestion {
    /// Builds a question and resolves its correct option from the answer token.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        let correct_answer = correct_answer.into();
        let correct_option = resolve_correct_option(&options, &correct_answer);
        Self {
            question: question.into(),
            options,
            correct_answer,
            correct_option,
        }
    }

    /// The resolved correct option, resolving on demand for records built elsewhere.
    pub fn expected_option(&self) -> Option<String> {
        self.correct_option
            .clone()
            .or_else(|| resolve_correct_option(&self.options, &self.correct_answer))
    }

    /// Renders the question back into the generator's block layout.
    pub fn to_block(&self) -> String {
        let mut block = self.question.clone();
        for option in &self.options {
            block.push('\n');
            block.push_str(option);
        }
        block.push('\n');
        block.push_str(CORRECT_ANSWER_MARKER);
        block.push(' ');
        block.push_str(&self.correct_answer);
        block
    }
}

/// Renders questions as blank-line separated blocks.
pub fn render_assessment(questions: &[ParsedQuestion]) -> String {
    questions
        .iter()
        .map(ParsedQuestion::to_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Parses generated text into questions, in block order.
pub fn parse_assessment(text: &str) -> Vec<ParsedQuestion> {
    let normalised = text.replace("\r\n", "\n");
    split_blocks(&normalised)
        .into_iter()
        .filter_map(|block| parse_block(&block))
        .collect()
}

/// Returns the lowercase letter labelling an option such as `a.`, `B)`, `(c)` or `d:`.
pub fn option_label(option: &str) -> Option<char> {
    let trimmed = option.trim_start();
    let unbracketed = trimmed.strip_prefix('(').unwrap_or(trimmed);
    let mut chars = unbracketed.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    match chars.next() {
        Some('.') | Some(')') | Some(':') => Some(letter.to_ascii_lowercase()),
        _ => None,
    }
}

// Blocks are separated by runs of empty lines. Whitespace-only lines touching a separator
// (or the ends of the text) are trimmed off the block; interior ones stay and are skipped
// when options are collected.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    text.split('\n')
        .collect::<Vec<_>>()
        .split(|line| line.is_empty())
        .filter_map(|block| {
            let start = block.iter().position(|line| !line.trim().is_empty())?;
            let end = block.iter().rposition(|line| !line.trim().is_empty())?;
            Some(block[start..=end].to_vec())
        })
        .collect()
}

fn parse_block(lines: &[&str]) -> Option<ParsedQuestion> {
    let (first, rest) = lines.split_first()?;

    let question = first.trim();
    if question.is_empty() {
        return None;
    }

    let options: Vec<String> = rest
        .iter()
        .filter(|line| !line.trim().is_empty() && !is_answer_line(line))
        .map(|line| line.trim().to_string())
        .collect();
    if options.is_empty() {
        return None;
    }

    let correct_answer = lines
        .iter()
        .find(|line| is_answer_line(line))
        .and_then(|line| line.split_once(':'))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())?;

    Some(ParsedQuestion::new(question, options, correct_answer))
}

fn is_answer_line(line: &str) -> bool {
    line.trim_start().starts_with(CORRECT_ANSWER_MARKER)
}

// Accepts `b`, `B`, `(b)`, `b.` or `b. Paris`; rejects multi-letter words.
fn answer_letter(token: &str) -> Option<char> {
    let trimmed = token.trim();
    let unbracketed = trimmed.strip_prefix('(').unwrap_or(trimmed);
    let mut chars = unbracketed.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => None,
        _ => Some(letter.to_ascii_lowercase()),
    }
}

fn resolve_correct_option(options: &[String], correct_answer: &str) -> Option<String> {
    let letter = answer_letter(correct_answer)?;

    if options.iter().all(|option| option_label(option).is_none()) {
        let index = usize::from((letter as u8).checked_sub(b'a')?);
        return options.get(index).cloned();
    }

    options
        .iter()
        .find(|option| option_label(option) == Some(letter))
        .cloned()
}

//! Answer scoring.
//!
//! Two entry points share a single comparison primitive, [`answers_match`]:
//! [`score_questions`] scores answers against parsed questions, and [`score_keyed`]
//! scores a keyed answer map against a keyed map of correct answers.

use crate::parser::ParsedQuestion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Submitted answers keyed by question index.
pub type AnswerMap = BTreeMap<usize, String>;

/// Answers keyed by an arbitrary question key. `None` marks a value that is not text
/// and therefore never matches.
pub type KeyedAnswers = BTreeMap<String, Option<String>>;

/// Outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub question: String,
    pub correct_answer: String,
    pub user_answer: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: usize,
    pub total: usize,
    pub message: String,
    pub per_question: Vec<QuestionReview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedScore {
    pub score: usize,
    pub total: usize,
    pub message: String,
}

/// Exact comparison: no case folding and no trimming.
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted == expected
}

pub fn score_message(score: usize, total: usize) -> String {
    format!("You scored {score} out of {total}.")
}

/// Scores answers against parsed questions.
///
/// Question `i` is correct when `answers[i]` matches either its resolved correct option
/// text or its bare correct-answer token. Unanswered questions count as incorrect and
/// `total` is the number of questions submitted.
pub fn score_questions(questions: &[ParsedQuestion], answers: &AnswerMap) -> ScoreResult {
    let per_question: Vec<QuestionReview> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_answer = answers.get(&index).cloned();
            let expected_option = question.expected_option();
            let is_correct = user_answer.as_deref().is_some_and(|answer| {
                answers_match(answer, &question.correct_answer)
                    || expected_option
                        .as_deref()
                        .is_some_and(|expected| answers_match(answer, expected))
            });

            QuestionReview {
                question: question.question.clone(),
                correct_answer: expected_option.unwrap_or_else(|| question.correct_answer.clone()),
                user_answer,
                is_correct,
            }
        })
        .collect();

    let score = per_question.iter().filter(|r| r.is_correct).count();
    let total = questions.len();

    ScoreResult {
        score,
        total,
        message: score_message(score, total),
        per_question,
    }
}

/// Scores a keyed answer map against keyed correct answers.
///
/// Every key of `correct_answers` counts towards `total`; keys only present in `answers`
/// are ignored.
pub fn score_keyed(answers: &KeyedAnswers, correct_answers: &KeyedAnswers) -> KeyedScore {
    let score = correct_answers
        .iter()
        .filter(|(key, expected)| {
            match (answers.get(*key).and_then(Option::as_deref), expected.as_deref()) {
                (Some(submitted), Some(expected)) => answers_match(submitted, expected),
                _ => false,
            }
        })
        .count();
    let total = correct_answers.len();

    KeyedScore {
        score,
        total,
        message: score_message(score, total),
    }
}

//! Wire types for the assessment REST API.
//!
//! Field names are camelCase on the wire. Request fields the handlers must report as
//! missing are `Option`s so that absence becomes a 400 rather than an extractor rejection.

use serde::{Deserialize, Serialize};
use skillnaav_core::{KeyedAnswers, KeyedScore, ParsedQuestion, QuestionReview, ScoreResult};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Duration as submitted by a form: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Number(serde_json::Number),
    Text(String),
}

impl DurationField {
    /// The value as text, or `None` for a numeric zero (treated as not supplied).
    ///
    /// Integral floats such as `30.0` are rendered without the fraction.
    pub fn as_text(&self) -> Option<String> {
        match self {
            DurationField::Number(n) if n.as_f64() == Some(0.0) => None,
            DurationField::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 => Some(format!("{f:.0}")),
                _ => Some(n.to_string()),
            },
            DurationField::Text(s) => Some(s.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerateAssessmentReq {
    #[schema(example = "Mathematics")]
    pub topic: Option<String>,
    #[schema(example = "medium")]
    pub difficulty: Option<String>,
    #[schema(value_type = Option<u32>, example = 30)]
    pub duration: Option<DurationField>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateAssessmentRes {
    pub success: bool,
    pub assessment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAssessmentReq {
    #[schema(value_type = Option<BTreeMap<String, String>>)]
    pub answers: Option<BTreeMap<String, serde_json::Value>>,
    #[schema(value_type = Option<BTreeMap<String, String>>)]
    pub correct_answers: Option<BTreeMap<String, serde_json::Value>>,
}

/// Keeps string values as answers; any other JSON value is kept as a key that never
/// matches.
pub fn keyed_answers(values: &BTreeMap<String, serde_json::Value>) -> KeyedAnswers {
    values
        .iter()
        .map(|(key, value)| (key.clone(), value.as_str().map(str::to_string)))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAssessmentRes {
    pub success: bool,
    pub score: usize,
    pub total_questions: usize,
    pub message: String,
}

impl From<KeyedScore> for ReviewAssessmentRes {
    fn from(score: KeyedScore) -> Self {
        Self {
            success: true,
            score: score.score,
            total_questions: score.total,
            message: score.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub correct_option: Option<String>,
}

impl From<ParsedQuestion> for Question {
    fn from(q: ParsedQuestion) -> Self {
        Self {
            question: q.question,
            options: q.options,
            correct_answer: q.correct_answer,
            correct_option: q.correct_option,
        }
    }
}

impl From<Question> for ParsedQuestion {
    fn from(q: Question) -> Self {
        Self {
            question: q.question,
            options: q.options,
            correct_answer: q.correct_answer,
            correct_option: q.correct_option,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ParseAssessmentReq {
    pub assessment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParseAssessmentRes {
    pub success: bool,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ScoreAssessmentReq {
    pub questions: Option<Vec<Question>>,
    /// Selected option keyed by question index.
    #[serde(default)]
    pub answers: BTreeMap<usize, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub correct_answer: String,
    pub user_answer: Option<String>,
    pub is_correct: bool,
}

impl From<QuestionReview> for QuestionResult {
    fn from(r: QuestionReview) -> Self {
        Self {
            question: r.question,
            correct_answer: r.correct_answer,
            user_answer: r.user_answer,
            is_correct: r.is_correct,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAssessmentRes {
    pub success: bool,
    pub score: usize,
    pub total: usize,
    pub message: String,
    pub per_question: Vec<QuestionResult>,
}

impl From<ScoreResult> for ScoreAssessmentRes {
    fn from(result: ScoreResult) -> Self {
        Self {
            success: true,
            score: result.score,
            total: result.total,
            message: result.message,
            per_question: result.per_question.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_field_accepts_number_and_string() {
        let req: GenerateAssessmentReq =
            serde_json::from_str(r#"{"topic":"t","difficulty":"easy","duration":30}"#)
                .expect("number duration");
        assert_eq!(req.duration.and_then(|d| d.as_text()).as_deref(), Some("30"));

        let req: GenerateAssessmentReq =
            serde_json::from_str(r#"{"topic":"t","difficulty":"easy","duration":"45"}"#)
                .expect("string duration");
        assert_eq!(req.duration.and_then(|d| d.as_text()).as_deref(), Some("45"));
    }

    #[test]
    fn test_duration_field_zero_is_absent() {
        let req: GenerateAssessmentReq =
            serde_json::from_str(r#"{"topic":"t","difficulty":"easy","duration":0}"#)
                .expect("zero duration");
        assert_eq!(req.duration.and_then(|d| d.as_text()), None);
    }

    #[test]
    fn test_review_request_uses_camel_case() {
        let req: ReviewAssessmentReq =
            serde_json::from_str(r#"{"answers":{"0":"b"},"correctAnswers":{"0":"b"}}"#)
                .expect("review request");
        assert!(req.answers.is_some());
        let correct = keyed_answers(&req.correct_answers.expect("present"));
        assert_eq!(correct.get("0"), Some(&Some("b".to_string())));
    }

    #[test]
    fn test_review_request_accepts_non_text_values() {
        let req: ReviewAssessmentReq = serde_json::from_str(
            r#"{"answers":{"0":1,"1":null,"2":"c"},"correctAnswers":{"0":1,"1":null,"2":"c"}}"#,
        )
        .expect("review request");
        let answers = keyed_answers(&req.answers.expect("answers"));
        let correct = keyed_answers(&req.correct_answers.expect("correct"));

        assert_eq!(answers.get("0"), Some(&None));
        assert_eq!(answers.get("1"), Some(&None));
        let score = skillnaav_core::score_keyed(&answers, &correct);
        assert_eq!((score.score, score.total), (1, 3));
    }

    #[test]
    fn test_duration_field_integral_float() {
        let req: GenerateAssessmentReq =
            serde_json::from_str(r#"{"topic":"t","difficulty":"easy","duration":30.0}"#)
                .expect("float duration");
        assert_eq!(req.duration.and_then(|d| d.as_text()).as_deref(), Some("30"));

        let req: GenerateAssessmentReq =
            serde_json::from_str(r#"{"topic":"t","difficulty":"easy","duration":30.5}"#)
                .expect("fractional duration");
        assert_eq!(req.duration.and_then(|d| d.as_text()).as_deref(), Some("30.5"));
    }

    #[test]
    fn test_review_response_field_names() {
        let res = ReviewAssessmentRes::from(skillnaav_core::score_keyed(
            &BTreeMap::new(),
            &BTreeMap::new(),
        ));
        let json = serde_json::to_value(&res).expect("serialise");
        assert_eq!(json["totalQuestions"], 0);
        assert_eq!(json["message"], "You scored 0 out of 0.");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_score_request_parses_index_keys() {
        let req: ScoreAssessmentReq = serde_json::from_str(
            r#"{"questions":[{"question":"Q?","options":["a. x"],"correctAnswer":"a"}],"answers":{"0":"a. x"}}"#,
        )
        .expect("score request");
        assert_eq!(req.answers.get(&0).map(String::as_str), Some("a. x"));
        assert_eq!(req.questions.expect("questions")[0].correct_option, None);
    }
}

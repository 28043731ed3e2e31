//! HTTP handlers for the assessment API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    keyed_answers, DurationField, ErrorRes, GenerateAssessmentReq, GenerateAssessmentRes,
    HealthRes, HealthService, ParseAssessmentReq, ParseAssessmentRes, Question, QuestionResult,
    ReviewAssessmentReq, ReviewAssessmentRes, ScoreAssessmentReq, ScoreAssessmentRes,
};
use skillnaav_core::{
    parse_assessment, score_keyed, score_questions, GenerationRequest, ParsedQuestion,
};

use crate::AppState;

const ALL_FIELDS_REQUIRED: &str = "All fields are required!";
const GENERATION_FAILED: &str = "Failed to generate assessment.";
const REVIEW_FIELDS_REQUIRED: &str = "Answers and correct answers are required!";
const ASSESSMENT_REQUIRED: &str = "Assessment text is required!";
const QUESTIONS_REQUIRED: &str = "Questions are required!";

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        generate_assessment,
        review_assessment,
        parse_assessment_text,
        score_assessment,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        GenerateAssessmentReq,
        GenerateAssessmentRes,
        ReviewAssessmentReq,
        ReviewAssessmentRes,
        ParseAssessmentReq,
        ParseAssessmentRes,
        Question,
        ScoreAssessmentReq,
        ScoreAssessmentRes,
        QuestionResult,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with OpenAPI docs and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-assessment", post(generate_assessment))
        .route("/api/review-assessment", post(review_assessment))
        .route("/api/parse-assessment", post(parse_assessment_text))
        .route("/api/score-assessment", post(score_assessment))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorRes::new(message)))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            Err(bad_request(rejection.body_text()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/generate-assessment",
    request_body = GenerateAssessmentReq,
    responses(
        (status = 200, description = "Raw assessment text", body = GenerateAssessmentRes),
        (status = 400, description = "Missing or invalid field", body = ErrorRes),
        (status = 500, description = "Upstream generation failed", body = ErrorRes)
    )
)]
/// Generate an assessment for a topic, difficulty and duration
///
/// Validates the request, builds the prompt and makes a single call to the
/// text-generation service. The upstream text is returned unparsed.
///
/// # Errors
/// Returns `400 Bad Request` if a field is missing or malformed; the upstream is not
/// called. Returns `500 Internal Server Error` if the upstream call fails.
#[axum::debug_handler]
async fn generate_assessment(
    State(state): State<AppState>,
    payload: Result<Json<GenerateAssessmentReq>, JsonRejection>,
) -> Result<Json<GenerateAssessmentRes>, ApiError> {
    let req = json_body(payload)?;
    let duration = req.duration.as_ref().and_then(DurationField::as_text);

    let request = match GenerationRequest::from_parts(
        req.topic.as_deref(),
        req.difficulty.as_deref(),
        duration.as_deref(),
    ) {
        Ok(request) => request,
        Err(e) if e.is_missing_field() => {
            tracing::warn!("Generate assessment rejected: {}", e);
            return Err(bad_request(ALL_FIELDS_REQUIRED));
        }
        Err(e) => {
            tracing::warn!("Generate assessment rejected: {}", e);
            return Err(bad_request(e.to_string()));
        }
    };

    match state.assessment_service.generate(&request).await {
        Ok(assessment) => Ok(Json(GenerateAssessmentRes {
            success: true,
            assessment,
        })),
        Err(e) => {
            tracing::error!("Error generating assessment: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes::new(GENERATION_FAILED)),
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/review-assessment",
    request_body = ReviewAssessmentReq,
    responses(
        (status = 200, description = "Score against the supplied correct answers", body = ReviewAssessmentRes),
        (status = 400, description = "Answers or correct answers missing", body = ErrorRes)
    )
)]
/// Score keyed answers against keyed correct answers
///
/// Every key of `correctAnswers` counts towards the total; comparison is exact and
/// values that are not strings never match.
#[axum::debug_handler]
async fn review_assessment(
    State(_state): State<AppState>,
    payload: Result<Json<ReviewAssessmentReq>, JsonRejection>,
) -> Result<Json<ReviewAssessmentRes>, ApiError> {
    let req = json_body(payload)?;
    let (Some(answers), Some(correct_answers)) = (req.answers, req.correct_answers) else {
        return Err(bad_request(REVIEW_FIELDS_REQUIRED));
    };

    let result = score_keyed(&keyed_answers(&answers), &keyed_answers(&correct_answers));
    tracing::info!(score = result.score, total = result.total, "Reviewed assessment");
    Ok(Json(result.into()))
}

#[utoipa::path(
    post,
    path = "/api/parse-assessment",
    request_body = ParseAssessmentReq,
    responses(
        (status = 200, description = "Questions recovered from the text", body = ParseAssessmentRes),
        (status = 400, description = "Assessment text missing", body = ErrorRes)
    )
)]
/// Parse raw assessment text into structured questions
///
/// Blocks without a question, options or a correct-answer line are dropped silently.
#[axum::debug_handler]
async fn parse_assessment_text(
    State(_state): State<AppState>,
    payload: Result<Json<ParseAssessmentReq>, JsonRejection>,
) -> Result<Json<ParseAssessmentRes>, ApiError> {
    let req = json_body(payload)?;
    let Some(text) = req.assessment else {
        return Err(bad_request(ASSESSMENT_REQUIRED));
    };

    let questions = parse_assessment(&text);
    Ok(Json(ParseAssessmentRes {
        success: true,
        questions: questions.into_iter().map(Question::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/score-assessment",
    request_body = ScoreAssessmentReq,
    responses(
        (status = 200, description = "Per-question review and score", body = ScoreAssessmentRes),
        (status = 400, description = "Questions missing", body = ErrorRes)
    )
)]
/// Score answers, keyed by question index, against parsed questions
#[axum::debug_handler]
async fn score_assessment(
    State(_state): State<AppState>,
    payload: Result<Json<ScoreAssessmentReq>, JsonRejection>,
) -> Result<Json<ScoreAssessmentRes>, ApiError> {
    let req = json_body(payload)?;
    let Some(questions) = req.questions else {
        return Err(bad_request(QUESTIONS_REQUIRED));
    };

    let questions: Vec<ParsedQuestion> = questions.into_iter().map(Into::into).collect();
    let result = score_questions(&questions, &req.answers);
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use skillnaav_core::{AssessmentService, GenerationClient, UpstreamError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    const CANNED: &str = "Question 1: 2+2?\na. 3\nb. 4\nc. 5\nd. 6\nCorrect Answer: b\n\nQuestion 2: Capital of France?\na. Berlin\nb. Paris\nc. Rome\nd. Madrid\nCorrect Answer: b";

    struct StubClient {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl GenerationClient for StubClient {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(UpstreamError::Status {
                    status: 500,
                    body: "boom".into(),
                })
            } else {
                Ok(CANNED.to_string())
            }
        }
    }

    fn app(fail: bool) -> (Router, Arc<StubClient>) {
        let client = Arc::new(StubClient {
            fail,
            calls: AtomicUsize::new(0),
        });
        let state = AppState {
            assessment_service: AssessmentService::new(client.clone()),
        };
        (router(state), client)
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = res.status();
        let bytes = res.into_body().collect().await.expect("body").to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let (app, _) = app(false);
        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_returns_raw_assessment() {
        let (app, client) = app(false);
        let (status, body) = post_json(
            app,
            "/api/generate-assessment",
            json!({"topic": "Maths", "difficulty": "easy", "duration": 10}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["assessment"], CANNED);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generate_accepts_string_duration() {
        let (app, _) = app(false);
        let (status, _) = post_json(
            app,
            "/api/generate-assessment",
            json!({"topic": "Maths", "difficulty": "Hard", "duration": "30"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_missing_topic_is_400_without_upstream_call() {
        let (app, client) = app(false);
        let (status, body) = post_json(
            app,
            "/api/generate-assessment",
            json!({"difficulty": "easy", "duration": 10}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], ALL_FIELDS_REQUIRED);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_zero_duration_is_missing() {
        let (app, client) = app(false);
        let (status, body) = post_json(
            app,
            "/api/generate-assessment",
            json!({"topic": "Maths", "difficulty": "easy", "duration": 0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], ALL_FIELDS_REQUIRED);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_unknown_difficulty_is_400() {
        let (app, client) = app(false);
        let (status, body) = post_json(
            app,
            "/api/generate-assessment",
            json!({"topic": "Maths", "difficulty": "extreme", "duration": 10}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().expect("error").contains("difficulty"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_upstream_failure_is_500() {
        let (app, client) = app(true);
        let (status, body) = post_json(
            app,
            "/api/generate-assessment",
            json!({"topic": "Maths", "difficulty": "easy", "duration": 10}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"success": false, "error": GENERATION_FAILED}));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_400() {
        let (app, _) = app(false);
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/generate-assessment")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_review_scores_keyed_answers() {
        let (app, _) = app(false);
        let (status, body) = post_json(
            app,
            "/api/review-assessment",
            json!({
                "answers": {"0": "b", "1": "a"},
                "correctAnswers": {"0": "b", "1": "c", "2": "d"}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "score": 1,
                "totalQuestions": 3,
                "message": "You scored 1 out of 3."
            })
        );
    }

    #[tokio::test]
    async fn test_review_counts_non_text_values_as_wrong() {
        let (app, _) = app(false);
        let (status, body) = post_json(
            app,
            "/api/review-assessment",
            json!({
                "answers": {"0": 1, "1": "b"},
                "correctAnswers": {"0": 1, "1": "b"}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 1);
        assert_eq!(body["totalQuestions"], 2);
    }

    #[tokio::test]
    async fn test_review_missing_correct_answers_is_400() {
        let (app, _) = app(false);
        let (status, body) =
            post_json(app, "/api/review-assessment", json!({"answers": {"0": "b"}})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], REVIEW_FIELDS_REQUIRED);
    }

    #[tokio::test]
    async fn test_parse_then_score_round_trip() {
        let (app, _) = app(false);
        let (status, parsed) =
            post_json(app.clone(), "/api/parse-assessment", json!({"assessment": CANNED})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(parsed["questions"].as_array().expect("questions").len(), 2);
        assert_eq!(parsed["questions"][0]["correctOption"], "b. 4");

        let (status, scored) = post_json(
            app,
            "/api/score-assessment",
            json!({
                "questions": parsed["questions"],
                "answers": {"0": "b. 4", "1": "a. Berlin"}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(scored["score"], 1);
        assert_eq!(scored["total"], 2);
        assert_eq!(scored["message"], "You scored 1 out of 2.");
        assert_eq!(scored["perQuestion"][0]["isCorrect"], true);
        assert_eq!(scored["perQuestion"][1]["userAnswer"], "a. Berlin");
        assert_eq!(scored["perQuestion"][1]["correctAnswer"], "b. Paris");
    }

    #[tokio::test]
    async fn test_parse_missing_text_is_400() {
        let (app, _) = app(false);
        let (status, body) = post_json(app, "/api/parse-assessment", json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], ASSESSMENT_REQUIRED);
    }

    #[tokio::test]
    async fn test_score_missing_questions_is_400() {
        let (app, _) = app(false);
        let (status, body) =
            post_json(app, "/api/score-assessment", json!({"answers": {"0": "a"}})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], QUESTIONS_REQUIRED);
    }

    #[tokio::test]
    async fn test_openapi_lists_assessment_routes() {
        let (app, _) = app(false);
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::OK);
        let bytes = res.into_body().collect().await.expect("body").to_bytes();
        let doc: Value = serde_json::from_slice(&bytes).expect("openapi json");
        assert!(doc["paths"]["/api/generate-assessment"].is_object());
        assert!(doc["paths"]["/api/review-assessment"].is_object());
    }
}

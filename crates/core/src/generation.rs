//! Client for the external text-generation service.
//!
//! [`GenerationClient`] is the only place where network I/O and non-determinism enter the
//! assessment pipeline. Tests substitute a canned implementation; production uses
//! [`OpenAiClient`] against a chat-completion endpoint.

use crate::config::UpstreamConfig;
use crate::constants::SYSTEM_MESSAGE;
use crate::UpstreamError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Produces raw assessment text for a prompt.
///
/// One call is one attempt: implementations do not retry.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionReq<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionRes {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Chat-completion client authenticated with a bearer token.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    cfg: Arc<UpstreamConfig>,
}

impl OpenAiClient {
    /// Creates a client whose requests are bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Request` if the HTTP client cannot be constructed.
    pub fn new(cfg: Arc<UpstreamConfig>) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(UpstreamError::Request)?;
        Ok(Self { http, cfg })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.cfg
    }

    fn map_send_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.cfg.timeout())
        } else {
            UpstreamError::Request(err)
        }
    }
}

#[async_trait::async_trait]
impl GenerationClient for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = ChatCompletionReq {
            model: self.cfg.model(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.cfg.max_tokens(),
            temperature: self.cfg.temperature(),
            n: 1,
        };

        tracing::debug!(model = self.cfg.model(), "sending chat completion request");

        let res = self
            .http
            .post(self.cfg.api_url())
            .bearer_auth(self.cfg.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "upstream returned an error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionRes = res.json().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.cfg.timeout())
            } else {
                UpstreamError::Decode(e)
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(UpstreamError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Captured {
        body: Arc<Mutex<Option<Value>>>,
        auth: Arc<Mutex<Option<String>>>,
    }

    /// Serves `router` on an ephemeral port and returns the completion URL.
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });
        format!("http://{addr}/v1/chat/completions")
    }

    fn client_for(url: String, timeout: Duration) -> OpenAiClient {
        let cfg = UpstreamConfig::new("sk-test")
            .expect("config")
            .with_api_url(url)
            .with_timeout(timeout)
            .expect("timeout");
        OpenAiClient::new(Arc::new(cfg)).expect("client")
    }

    #[tokio::test]
    async fn test_generate_returns_completion_text() {
        let captured = Captured::default();
        let router = Router::new()
            .route(
                "/v1/chat/completions",
                post(
                    |State(c): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| async move {
                        *c.body.lock().unwrap() = Some(body);
                        *c.auth.lock().unwrap() = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        Json(json!({
                            "choices": [{ "message": { "role": "assistant", "content": "Q1?\na. x\nCorrect Answer: a" } }]
                        }))
                    },
                ),
            )
            .with_state(captured.clone());
        let client = client_for(spawn_stub(router).await, Duration::from_secs(5));

        let text = client.generate("the prompt").await.expect("completion");

        assert_eq!(text, "Q1?\na. x\nCorrect Answer: a");
        assert_eq!(captured.auth.lock().unwrap().as_deref(), Some("Bearer sk-test"));
        let body = captured.body.lock().unwrap().clone().expect("body captured");
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["max_tokens"], 2048);
        assert_eq!(body["n"], 1);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_MESSAGE);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "the prompt");
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": { "message": "Incorrect API key provided" } })),
                )
            }),
        );
        let client = client_for(spawn_stub(router).await, Duration::from_secs(5));

        let err = client.generate("p").await.expect_err("should fail");

        match err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Incorrect API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_choices() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = client_for(spawn_stub(router).await, Duration::from_secs(5));

        let err = client.generate("p").await.expect_err("should fail");
        assert!(matches!(err, UpstreamError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "choices": [] }))
            }),
        );
        let client = client_for(spawn_stub(router).await, Duration::from_millis(200));

        let err = client.generate("p").await.expect_err("should time out");
        assert!(matches!(err, UpstreamError::Timeout(d) if d == Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_generate_reports_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let client = client_for(
            format!("http://{addr}/v1/chat/completions"),
            Duration::from_secs(5),
        );

        let err = client.generate("p").await.expect_err("should fail");
        assert!(matches!(err, UpstreamError::Request(_)));
    }
}

//! Client for OpenAI-compatible chat completion endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::LanguageModel;
use crate::config::OpenAiConfig;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiChat {
    pub fn new(config: &OpenAiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Upstream("language model API key not configured".into()))?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: instruction,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("language model request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, body = %body, "Language model returned an error");
            return Err(AppError::Upstream(format!(
                "language model returned status {}",
                status
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("unreadable language model reply: {}", e)))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("language model returned no content".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn config(base_url: String, api_key: Option<&str>) -> OpenAiConfig {
        OpenAiConfig {
            api_key: api_key.map(str::to_string),
            base_url,
            model: "test-model".into(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_complete_sends_instruction_and_input() {
        async fn handler(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
            assert_eq!(headers["authorization"], "Bearer sk-test");
            assert_eq!(body["model"], "test-model");
            assert_eq!(body["messages"][0]["role"], "system");
            assert_eq!(body["messages"][1]["content"], "went to the market");
            let reply = format!("once upon a time, {}", body["messages"][1]["content"].as_str().unwrap());
            Json(json!({ "choices": [{ "message": { "role": "assistant", "content": reply } }] }))
        }

        let base = spawn_stub(Router::new().route("/v1/chat/completions", post(handler))).await;
        let chat = OpenAiChat::new(&config(base, Some("sk-test"))).unwrap();

        let reply = chat.complete("be kind", "went to the market").await.unwrap();
        assert_eq!(reply, "once upon a time, went to the market");
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = spawn_stub(router).await;
        let chat = OpenAiChat::new(&config(base, Some("sk-test"))).unwrap();

        let err = chat.complete("i", "x").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_upstream_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = spawn_stub(router).await;
        let chat = OpenAiChat::new(&config(base, Some("sk-test"))).unwrap();

        assert!(matches!(
            chat.complete("i", "x").await,
            Err(AppError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let chat = OpenAiChat::new(&config("http://127.0.0.1:9".into(), None)).unwrap();
        assert!(!chat.is_configured());
        assert!(matches!(
            chat.complete("i", "x").await,
            Err(AppError::Upstream(_))
        ));
    }
}

pub mod handlers;
pub mod routes;

use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `Json` body extractor whose rejections are reported as [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub story: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveStoryRequest {
    pub username: Option<String>,
    pub story: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct NarrativeResponse {
    pub story: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ResultResponse {
    pub fn success() -> Self {
        Self {
            result: "success",
            url: None,
        }
    }

    pub fn with_url(url: String) -> Self {
        Self {
            result: "success",
            url: Some(url),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

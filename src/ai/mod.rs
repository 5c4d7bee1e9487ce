//! External AI collaborators.
//!
//! Each collaborator is a stateless request/response call owned by a third
//! party. Failures surface as [`AppError::Upstream`]; nothing here retries or
//! caches.

pub mod demo;
pub mod openai;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;

pub use demo::{DemoImageGenerator, DemoSpeechSynthesizer, DemoTranscriber};
pub use openai::OpenAiChat;

/// Instruction used to turn a transcript into a narrative.
pub const NARRATIVE_INSTRUCTION: &str = "감동적인 스토리로 각색해줘.";

/// Instruction used for free-form chat.
pub const ASSISTANT_INSTRUCTION: &str = "친절한 AI 비서입니다. 사용자 질문에 답변하세요.";

/// Audio uploaded for transcription.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, clip: AudioClip) -> Result<String, AppError>;
}

/// A chat-completion style text model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, AppError>;
}

/// Renders text to audio and returns where the audio can be fetched.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<String, AppError>;
}

/// Renders text to an illustration and returns where it can be fetched.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, text: &str) -> Result<String, AppError>;
}

pub async fn narrate(model: &dyn LanguageModel, text: &str) -> Result<String, AppError> {
    model.complete(NARRATIVE_INSTRUCTION, text).await
}

pub async fn chat(model: &dyn LanguageModel, message: &str) -> Result<String, AppError> {
    model.complete(ASSISTANT_INSTRUCTION, message).await
}

//! Stand-ins that answer with fixed results, for running without
//! third-party speech or image services.

use async_trait::async_trait;

use super::{AudioClip, ImageGenerator, SpeechSynthesizer, Transcriber};
use crate::error::AppError;

pub const DEMO_TRANSCRIPT: &str = "오늘 나는 엄마와 시장에 다녀왔어요.";

pub struct DemoTranscriber;

#[async_trait]
impl Transcriber for DemoTranscriber {
    async fn transcribe(&self, clip: AudioClip) -> Result<String, AppError> {
        if clip.data.is_empty() {
            return Err(AppError::Upstream("audio payload is empty".into()));
        }
        tracing::debug!(
            bytes = clip.data.len(),
            filename = clip.filename.as_deref().unwrap_or("-"),
            "Returning demo transcript"
        );
        Ok(DEMO_TRANSCRIPT.to_string())
    }
}

pub struct DemoSpeechSynthesizer {
    url: String,
}

impl DemoSpeechSynthesizer {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl SpeechSynthesizer for DemoSpeechSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<String, AppError> {
        Ok(self.url.clone())
    }
}

pub struct DemoImageGenerator {
    url: String,
}

impl DemoImageGenerator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl ImageGenerator for DemoImageGenerator {
    async fn generate(&self, _text: &str) -> Result<String, AppError> {
        Ok(self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_demo_transcriber() {
        let clip = AudioClip {
            data: Bytes::from_static(b"audio"),
            filename: Some("a.wav".into()),
            content_type: None,
        };
        assert_eq!(DemoTranscriber.transcribe(clip).await.unwrap(), DEMO_TRANSCRIPT);
    }

    #[tokio::test]
    async fn test_demo_transcriber_rejects_empty_audio() {
        let clip = AudioClip {
            data: Bytes::new(),
            filename: None,
            content_type: None,
        };
        let err = DemoTranscriber.transcribe(clip).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_demo_urls() {
        let tts = DemoSpeechSynthesizer::new("https://example.test/a.mp3");
        let image = DemoImageGenerator::new("https://example.test/a.png");
        assert_eq!(tts.synthesize("hi").await.unwrap(), "https://example.test/a.mp3");
        assert_eq!(image.generate("hi").await.unwrap(), "https://example.test/a.png");
    }
}

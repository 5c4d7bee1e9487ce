//! Storytelling backend: transcribe a spoken introduction, turn it into a
//! narrative with a language model, and keep narratives per user.

pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod stories;
pub mod store;
pub mod uploads;

use std::sync::Arc;

use axum::Router;

use ai::{DemoImageGenerator, DemoSpeechSynthesizer, DemoTranscriber, OpenAiChat};
use api::routes::{create_router, AppState, StaticDirs};
use config::Config;
use error::AppError;
use stories::StoryService;
use store::SqliteStoryStore;
use uploads::FsAssetStore;

/// Wires the production collaborators from `config` and returns the router.
pub fn build_app(config: &Config) -> Result<Router, AppError> {
    let store = SqliteStoryStore::open(&config.database_path)?;
    let assets = FsAssetStore::new(config.upload_dir.clone())?;

    let model = OpenAiChat::new(&config.openai)?;
    if !model.is_configured() {
        tracing::warn!("OPENAI_API_KEY is not set; narrative and chat requests will fail");
    }

    let state = Arc::new(AppState {
        stories: StoryService::new(Arc::new(store)),
        assets: Arc::new(assets),
        transcriber: Arc::new(DemoTranscriber),
        model: Arc::new(model),
        speech: Arc::new(DemoSpeechSynthesizer::new(config.demo_tts_url.clone())),
        images: Arc::new(DemoImageGenerator::new(config.demo_image_url.clone())),
    });

    Ok(create_router(
        state,
        StaticDirs {
            uploads: &config.upload_dir,
            site: &config.static_dir,
        },
    ))
}

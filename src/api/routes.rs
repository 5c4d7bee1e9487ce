use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use crate::ai::{ImageGenerator, LanguageModel, SpeechSynthesizer, Transcriber};
use crate::stories::StoryService;
use crate::uploads::AssetStore;

// Audio clips can run to several MB; axum's default cap is 2 MB.
const AUDIO_UPLOAD_LIMIT_BYTES: usize = 64 * 1024 * 1024;

pub struct AppState {
    pub stories: StoryService,
    pub assets: Arc<dyn AssetStore>,
    pub transcriber: Arc<dyn Transcriber>,
    pub model: Arc<dyn LanguageModel>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub images: Arc<dyn ImageGenerator>,
}

/// Directories served as static files.
pub struct StaticDirs<'a> {
    pub uploads: &'a Path,
    pub site: &'a Path,
}

pub fn create_router(state: Arc<AppState>, dirs: StaticDirs<'_>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let upload_limit = DefaultBodyLimit::max(AUDIO_UPLOAD_LIMIT_BYTES);

    let api_routes = Router::new()
        .route("/stt", post(handlers::transcribe).layer(upload_limit.clone()))
        .route("/story", post(handlers::generate_narrative))
        .route("/story/save", post(handlers::save_story))
        .route("/story/list", get(handlers::list_stories))
        .route("/intro/upload", post(handlers::upload_intro).layer(upload_limit))
        .route("/tts", post(handlers::synthesize_speech))
        .route("/image", post(handlers::generate_image))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api_routes)
        .route("/favicon.ico", get(handlers::favicon))
        .nest_service("/uploads", ServeDir::new(dirs.uploads))
        .fallback_service(ServeDir::new(dirs.site).append_index_html_on_directories(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

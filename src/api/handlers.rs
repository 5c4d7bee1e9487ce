use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use std::sync::Arc;

use super::{
    AppJson, ChatRequest, ChatResponse, HealthResponse, ListQuery, NarrativeResponse, ResultResponse,
    SaveStoryRequest, StoryRequest, TextRequest, TranscriptResponse, UrlResponse,
};
use crate::ai::{self, AudioClip};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::store::Story;
use crate::stories::required;
use crate::uploads::intro_filename;

const DEFAULT_USERNAME: &str = "anonymous";

/// Fields collected from a multipart upload.
#[derive(Default)]
struct UploadForm {
    file: Option<AudioClip>,
    username: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data: Bytes = field.bytes().await?;
                form.file = Some(AudioClip {
                    data,
                    filename,
                    content_type,
                });
            }
            Some("username") => form.username = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<TranscriptResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let clip = form.file.ok_or_else(|| AppError::missing_field("file"))?;

    let text = state.transcriber.transcribe(clip).await?;
    Ok(Json(TranscriptResponse { text }))
}

pub async fn generate_narrative(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<TextRequest>,
) -> Result<Json<NarrativeResponse>, AppError> {
    let text = required("text", request.text.as_deref())?;

    let story = ai::narrate(state.model.as_ref(), text).await?;
    Ok(Json(NarrativeResponse { story }))
}

pub async fn save_story(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<SaveStoryRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let stories = state.stories.clone();
    tokio::task::spawn_blocking(move || {
        stories.save(request.username.as_deref(), request.story.as_deref())
    })
    .await??;

    Ok(Json(ResultResponse::success()))
}

pub async fn list_stories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Story>>, AppError> {
    let stories = state.stories.clone();
    let found = tokio::task::spawn_blocking(move || stories.list(query.username.as_deref())).await??;

    Ok(Json(found))
}

pub async fn upload_intro(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ResultResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let clip = form.file.ok_or_else(|| AppError::missing_field("file"))?;
    let username = form.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    let filename = intro_filename(&username, clip.filename.as_deref().unwrap_or_default());
    if filename.is_empty() {
        return Err(AppError::Validation("upload filename is empty after sanitizing".into()));
    }

    state.assets.put(&filename, clip.data).await?;
    Ok(Json(ResultResponse::with_url(format!("/uploads/{}", filename))))
}

pub async fn synthesize_speech(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<StoryRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    let story = required("story", request.story.as_deref())?;

    let url = state.speech.synthesize(story).await?;
    Ok(Json(UrlResponse { url }))
}

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<StoryRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    let story = required("story", request.story.as_deref())?;

    let url = state.images.generate(story).await?;
    Ok(Json(UrlResponse { url }))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = required("message", request.message.as_deref())?;

    let response = ai::chat(state.model.as_ref(), message).await?;
    Ok(Json(ChatResponse { response }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

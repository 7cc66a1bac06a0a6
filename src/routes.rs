use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use base64::Engine;
use photo_store::{IngestFailure, IngestFile, ViewablePhoto};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::{ChatRequest, GuestbookEntry, Message, NewGuestbookEntry, NewMessage};
use crate::services::{guestbook_service, message_service};
use crate::state::SharedState;

// ── Message board ────────────────────────────────────────────────────

/// GET /api/messages
pub async fn list_messages(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Message>>, AppError> {
    let conn = state.db()?;
    let messages = message_service::list_messages(&conn)?;
    log::info!("found {} messages", messages.len());
    Ok(Json(messages))
}

/// POST /api/messages
pub async fn create_message(
    State(state): State<SharedState>,
    Json(new): Json<NewMessage>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let conn = state.db()?;
    let message = message_service::create_message(&conn, new)?;
    Ok((StatusCode::CREATED, Json(message)))
}

// ── Chat relay ───────────────────────────────────────────────────────

/// POST /api/chat
pub async fn chat(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let history = request.messages.unwrap_or_default();
    let response = state.chat.forward(&history).await?;
    Ok(Json(response))
}

// ── Photo gallery ────────────────────────────────────────────────────

/// One file of an upload batch; `data` is the base64-encoded payload
#[derive(Debug, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub stored: usize,
    pub failed: usize,
    pub failures: Vec<IngestFailure>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub completed: usize,
    pub total: usize,
}

/// GET /api/photos
pub async fn list_photos(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ViewablePhoto>>, AppError> {
    let gallery = state.gallery()?;
    Ok(Json(gallery.photos().to_vec()))
}

/// POST /api/photos - run the ingest pipeline over an upload batch
pub async fn upload_photos(
    State(state): State<SharedState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut files = Vec::with_capacity(request.files.len());
    for file in request.files {
        let data = base64::engine::general_purpose::STANDARD
            .decode(&file.data)
            .map_err(|e| {
                AppError::Validation(format!("file {} is not valid base64: {}", file.name, e))
            })?;
        files.push(IngestFile {
            name: file.name,
            mime_type: file.mime_type,
            data,
        });
    }

    let mut gallery = state.gallery()?;
    state.progress.set(0, files.len());
    let report = gallery.ingest(files, |done, total| state.progress.set(done, total))?;
    state.progress.reset();

    Ok(Json(UploadResponse {
        stored: report.stored.len(),
        failed: report.failures.len(),
        failures: report.failures,
    }))
}

/// GET /api/photos/progress
pub async fn upload_progress(State(state): State<SharedState>) -> Json<ProgressResponse> {
    let (completed, total) = state.progress.get();
    Json(ProgressResponse { completed, total })
}

/// DELETE /api/photos/{index} - positional index into the current list
pub async fn delete_photo(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    let mut gallery = state.gallery()?;
    gallery.delete(index)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Guestbook ────────────────────────────────────────────────────────

/// GET /api/guestbook
pub async fn list_guestbook(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GuestbookEntry>>, AppError> {
    let conn = state.db()?;
    Ok(Json(guestbook_service::list_entries(&conn)?))
}

/// POST /api/guestbook
pub async fn create_guestbook(
    State(state): State<SharedState>,
    Json(new): Json<NewGuestbookEntry>,
) -> Result<(StatusCode, Json<GuestbookEntry>), AppError> {
    let conn = state.db()?;
    let entry = guestbook_service::create_entry(&conn, new.author, new.text)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/guestbook/{id}
pub async fn delete_guestbook(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let conn = state.db()?;
    guestbook_service::delete_entry(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}

//! Axum route handlers for `/api/notes` and `/api/bookmarks`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::bookmark::{Bookmark, BookmarkInput};
use crate::models::note::{Note, NoteInput};
use crate::records::extract::JsonBody;
use crate::records::filter::ListQuery;
use crate::state::AppState;

const NOTE_NOT_FOUND: &str = "Note not found";
const BOOKMARK_NOT_FOUND: &str = "Bookmark not found";

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

fn note_not_found() -> AppError {
    AppError::NotFound(NOTE_NOT_FOUND.to_string())
}

fn bookmark_not_found() -> AppError {
    AppError::NotFound(BOOKMARK_NOT_FOUND.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Notes
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NoteInput>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let note = state.notes.create(input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/notes?q=&tags=&favorite=
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Note>>, AppError> {
    Ok(Json(state.notes.list(&query).await?))
}

/// GET /api/notes/:id
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    state.notes.get(&id).await?.map(Json).ok_or_else(note_not_found)
}

/// PUT /api/notes/:id
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<NoteInput>,
) -> Result<Json<Note>, AppError> {
    state
        .notes
        .update(&id, input)
        .await?
        .map(Json)
        .ok_or_else(note_not_found)
}

/// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    if !state.notes.delete(&id).await? {
        return Err(note_not_found());
    }
    Ok(Json(DeletedResponse {
        message: "Note deleted successfully",
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Bookmarks
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/bookmarks
///
/// Fetches the page for a title when none is supplied.
pub async fn create_bookmark(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BookmarkInput>,
) -> Result<(StatusCode, Json<Bookmark>), AppError> {
    let bookmark = state.bookmarks.create(input).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// GET /api/bookmarks?q=&tags=&favorite=
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Bookmark>>, AppError> {
    Ok(Json(state.bookmarks.list(&query).await?))
}

/// GET /api/bookmarks/:id
pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, AppError> {
    state
        .bookmarks
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(bookmark_not_found)
}

/// PUT /api/bookmarks/:id
pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<BookmarkInput>,
) -> Result<Json<Bookmark>, AppError> {
    state
        .bookmarks
        .update(&id, input)
        .await?
        .map(Json)
        .ok_or_else(bookmark_not_found)
}

/// DELETE /api/bookmarks/:id
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    if !state.bookmarks.delete(&id).await? {
        return Err(bookmark_not_found());
    }
    Ok(Json(DeletedResponse {
        message: "Bookmark deleted successfully",
    }))
}

//! API handlers for notes

use super::handlers::{AppError, NotesState};
use super::{NotesListQuery, PaginatedResponse};
use crate::notes::{DeletedResponse, Note, NoteBody};
use axum::{
    extract::{
        rejection::JsonRejection, rejection::QueryRejection, FromRequestParts, Path, Query, State,
    },
    http::{request::Parts, StatusCode},
    Json,
};

/// Note id taken from the `{note_id}` path segment.
///
/// A segment that cannot be decoded is reported as an unknown note.
pub struct NoteId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for NoteId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(NoteId(id)),
            Err(rejection) => {
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                tracing::debug!(error = %rejection, raw_id = raw, "Undecodable note id");
                Err(AppError::NotFound(raw.to_string()))
            }
        }
    }
}

/// List notes, newest first, with optional keyword search
pub async fn list_notes(
    State(state): State<NotesState>,
    query: Result<Query<NotesListQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Note>>, AppError> {
    let Query(query) = query?;
    let params = query.validate().map_err(AppError::Validation)?;

    let (items, meta) = state.notes.list_notes(&params);
    Ok(Json(PaginatedResponse::new(items, meta)))
}

/// Create a new note
pub async fn create_note(
    State(state): State<NotesState>,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let Json(body) = body?;
    let note = state.notes.create_note(&body)?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Get a note by ID
pub async fn get_note(
    State(state): State<NotesState>,
    NoteId(note_id): NoteId,
) -> Result<Json<Note>, AppError> {
    let note = state.notes.get_note(&note_id)?;
    Ok(Json(note))
}

/// Replace a note's title and content
pub async fn replace_note(
    State(state): State<NotesState>,
    NoteId(note_id): NoteId,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    // A missing note wins over a malformed body
    state.notes.get_note(&note_id)?;
    let Json(body) = body?;

    let note = state.notes.replace_note(&note_id, &body)?;
    Ok(Json(note))
}

/// Update some of a note's fields
pub async fn patch_note(
    State(state): State<NotesState>,
    NoteId(note_id): NoteId,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    state.notes.get_note(&note_id)?;
    let Json(body) = body?;

    let note = state.notes.patch_note(&note_id, &body)?;
    Ok(Json(note))
}

/// Delete a note
pub async fn delete_note(
    State(state): State<NotesState>,
    NoteId(note_id): NoteId,
) -> Result<Json<DeletedResponse>, AppError> {
    state.notes.delete_note(&note_id)?;
    Ok(Json(DeletedResponse { deleted: true }))
}

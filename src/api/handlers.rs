//! Shared API state, health check, and the error type every handler returns

use crate::notes::{FieldIssue, InMemoryNoteStore, NoteError, NoteManager, ValidationErrors};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// Shared server state
pub struct ServerState {
    pub notes: NoteManager,
}

impl ServerState {
    /// State backed by a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self {
            notes: NoteManager::new(Arc::new(InMemoryNoteStore::new())),
        }
    }
}

/// Shared notes state
pub type NotesState = Arc<ServerState>;

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check handler. The store is in-process, so there is nothing else to check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Fallback for requests that match no route
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Turn a panic inside a handler into a 500 response with the usual envelope
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

// ============================================================================
// Error handling
// ============================================================================

/// Error codes carried in the `error.code` field of every error response
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOTE_NOT_FOUND: &str = "NOTE_NOT_FOUND";
    pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// API error, rendered as `{ "error": { "code", "message", "details" } }`
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(ValidationErrors),
    #[error("Note {0} not found")]
    NotFound(String),
    #[error("Route {0} not found")]
    RouteNotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status code, error code, client-facing message, and details
    fn parts(&self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                codes::VALIDATION_ERROR,
                "Request validation failed".to_string(),
                json!(err.issues),
            ),
            AppError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                codes::NOTE_NOT_FOUND,
                self.to_string(),
                json!({ "id": id }),
            ),
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                codes::ROUTE_NOT_FOUND,
                self.to_string(),
                json!({ "path": path }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Value::Null,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if let AppError::Internal(e) = &self {
            tracing::error!(error = ?e, "Unhandled error while serving request");
        }

        let (status, code, message, details) = self.parts();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "details": details,
            }
        }));

        (status, body).into_response()
    }
}

impl From<NoteError> for AppError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::Validation(e) => AppError::Validation(e),
            NoteError::NotFound(id) => AppError::NotFound(id),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(ValidationErrors {
            issues: vec![FieldIssue::new("body", rejection.body_text())],
        })
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(ValidationErrors {
            issues: vec![FieldIssue::new("query", rejection.body_text())],
        })
    }
}

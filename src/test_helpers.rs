//! Test helper factories and router builders
//!
//! Provides convenience functions for creating notes and request bodies with
//! sensible defaults, and for building a router over a fresh in-memory store.
#![allow(dead_code)]

use crate::api::create_router;
use crate::api::handlers::ServerState;
use crate::notes::{InMemoryNoteStore, Note, NoteBody, NoteManager, NoteStore};
use axum::body::Body;
use axum::http::Request;
use chrono::{Duration, Utc};
use std::sync::Arc;

// ============================================================================
// Router builders
// ============================================================================

/// Build a test router with an empty store
pub fn test_app() -> axum::Router {
    create_router(Arc::new(ServerState::in_memory()))
}

/// Build a test router over the given store
pub fn test_app_with_store(store: Arc<InMemoryNoteStore>) -> axum::Router {
    create_router(Arc::new(ServerState {
        notes: NoteManager::new(store),
    }))
}

/// Build a test router holding a single note
pub fn test_app_with_note() -> (axum::Router, Note) {
    let store = Arc::new(InMemoryNoteStore::new());
    let note = test_note("Seeded note", "Seeded content");
    store.insert(note.clone());
    (test_app_with_store(store), note)
}

/// Build a test router pre-seeded with notes created one minute apart,
/// oldest first in slice order.
pub fn test_app_with_notes(notes: &[(&str, &str)]) -> axum::Router {
    let store = Arc::new(InMemoryNoteStore::new());
    let base = Utc::now() - Duration::hours(1);
    for (i, (title, content)) in notes.iter().enumerate() {
        let mut note = test_note(title, content);
        note.created_at = base + Duration::minutes(i as i64);
        note.updated_at = note.created_at;
        store.insert(note);
    }
    test_app_with_store(store)
}

// ============================================================================
// Requests and responses
// ============================================================================

/// Build a request with an empty body
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a request with a JSON body
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    raw_request(method, uri, &body.to_string())
}

/// Build a request with an arbitrary body declared as JSON
pub fn raw_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    typed_request(method, uri, Some("application/json"), body)
}

/// Build a request with an explicit content-type, or none at all
pub fn typed_request(
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Read a response body as JSON
pub async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// Test data factories
// ============================================================================

/// Create a test note with the given title and content
pub fn test_note(title: &str, content: &str) -> Note {
    Note::new(title.to_string(), content.to_string())
}

/// Create a test note with a specific title
pub fn test_note_titled(title: &str) -> Note {
    test_note(title, "Test content")
}

/// Create a complete request body
pub fn note_body(title: &str, content: &str) -> NoteBody {
    NoteBody {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
    }
}

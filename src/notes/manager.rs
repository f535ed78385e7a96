//! Note Manager - CRUD operations for notes
//!
//! Sits between the HTTP handlers and the [`NoteStore`]: every operation
//! validates its input first, then touches the store. Nothing is written when
//! validation fails.

use super::models::*;
use super::store::NoteStore;
use super::validation::{self, ListParams, ValidationErrors};
use std::cmp::Reverse;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned by [`NoteManager`] operations
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// Carries the id exactly as the caller supplied it
    #[error("Note {0} not found")]
    NotFound(String),
}

pub type NoteResult<T> = Result<T, NoteError>;

/// Manager for note operations
#[derive(Clone)]
pub struct NoteManager {
    store: Arc<dyn NoteStore>,
}

impl NoteManager {
    /// Create a new NoteManager over the given store
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Resolve a caller-supplied id. Ids that are not UUIDs cannot exist.
    fn parse_id(id: &str) -> NoteResult<Uuid> {
        Uuid::parse_str(id).map_err(|_| NoteError::NotFound(id.to_string()))
    }

    /// Fail with NotFound unless a note with this id is stored
    fn ensure_exists(&self, id: &str) -> NoteResult<Uuid> {
        let note_id = Self::parse_id(id)?;
        if self.store.get(note_id).is_none() {
            return Err(NoteError::NotFound(id.to_string()));
        }
        Ok(note_id)
    }

    /// List notes, newest first, optionally filtered by a keyword, one page at a time
    pub fn list_notes(&self, params: &ListParams) -> (Vec<Note>, PageMeta) {
        let mut notes = self.store.list();
        notes.sort_by_key(|n| (Reverse(n.created_at), n.id));

        if let Some(q) = &params.q {
            let needle = q.to_lowercase();
            notes.retain(|n| n.matches(&needle));
        }

        let meta = PageMeta::new(params.page, params.limit, notes.len());
        let items = notes
            .into_iter()
            .skip(meta.offset())
            .take(meta.limit)
            .collect();
        (items, meta)
    }

    /// Get a note by id
    pub fn get_note(&self, id: &str) -> NoteResult<Note> {
        let note_id = Self::parse_id(id)?;
        self.store
            .get(note_id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }

    /// Create a new note
    pub fn create_note(&self, body: &NoteBody) -> NoteResult<Note> {
        let input = validation::validate_create(body)?;
        let note = Note::new(input.title, input.content);
        self.store.insert(note.clone());

        tracing::debug!(note_id = %note.id, "Created note");
        Ok(note)
    }

    /// Replace title and content of an existing note; both fields are required
    pub fn replace_note(&self, id: &str, body: &NoteBody) -> NoteResult<Note> {
        let note_id = self.ensure_exists(id)?;
        let input = validation::validate_create(body)?;

        let note = self
            .store
            .update(note_id, &mut |note| {
                note.replace(input.title.clone(), input.content.clone())
            })
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;

        tracing::debug!(note_id = %note.id, "Replaced note");
        Ok(note)
    }

    /// Merge the provided fields into an existing note
    pub fn patch_note(&self, id: &str, body: &NoteBody) -> NoteResult<Note> {
        let note_id = self.ensure_exists(id)?;
        let patch = validation::validate_update(body)?;

        let note = self
            .store
            .update(note_id, &mut |note| note.apply(patch.clone()))
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;

        tracing::debug!(note_id = %note.id, "Patched note");
        Ok(note)
    }

    /// Delete a note
    pub fn delete_note(&self, id: &str) -> NoteResult<()> {
        let note_id = Self::parse_id(id)?;
        self.store
            .delete(note_id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;

        tracing::debug!(note_id = %note_id, "Deleted note");
        Ok(())
    }
}

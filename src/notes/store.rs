//! Note storage
//!
//! [`NoteStore`] is the seam between the service layer and wherever notes are
//! kept. The only implementation is [`InMemoryNoteStore`]: notes live for the
//! lifetime of the process and are gone after a restart.

use super::models::Note;
use dashmap::DashMap;
use uuid::Uuid;

/// Keyed note storage. All operations are synchronous and non-blocking.
pub trait NoteStore: Send + Sync {
    /// Get a note by id
    fn get(&self, id: Uuid) -> Option<Note>;

    /// Snapshot of every stored note, in no particular order
    fn list(&self) -> Vec<Note>;

    /// Insert a note, overwriting any note with the same id
    fn insert(&self, note: Note);

    /// Overwrite an existing note. Returns `None` if no note has that id.
    fn replace(&self, note: Note) -> Option<Note>;

    /// Apply `f` to the stored note in place and return the updated note.
    ///
    /// The read-modify-write happens under the entry's lock, so concurrent
    /// updates of the same id cannot interleave.
    fn update(&self, id: Uuid, f: &mut dyn FnMut(&mut Note)) -> Option<Note>;

    /// Remove a note, returning it if it existed
    fn delete(&self, id: Uuid) -> Option<Note>;

    /// Number of stored notes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local note store backed by a sharded concurrent map
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    notes: DashMap<Uuid, Note>,
}

impl InMemoryNoteStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn get(&self, id: Uuid) -> Option<Note> {
        self.notes.get(&id).map(|entry| entry.value().clone())
    }

    fn list(&self) -> Vec<Note> {
        self.notes.iter().map(|entry| entry.value().clone()).collect()
    }

    fn insert(&self, note: Note) {
        self.notes.insert(note.id, note);
    }

    fn replace(&self, note: Note) -> Option<Note> {
        let mut existing = self.notes.get_mut(&note.id)?;
        *existing = note;
        Some(existing.clone())
    }

    fn update(&self, id: Uuid, f: &mut dyn FnMut(&mut Note)) -> Option<Note> {
        let mut entry = self.notes.get_mut(&id)?;
        f(entry.value_mut());
        Some(entry.clone())
    }

    fn delete(&self, id: Uuid) -> Option<Note> {
        self.notes.remove(&id).map(|(_, note)| note)
    }

    fn len(&self) -> usize {
        self.notes.len()
    }
}

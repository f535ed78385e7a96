//! Notes module
//!
//! Short titled text notes kept in process memory: the data model, input
//! validation, the store seam, and the [`NoteManager`] that ties them together.

pub mod manager;
pub mod models;
pub mod store;
pub mod validation;

pub use manager::{NoteError, NoteManager, NoteResult};
pub use models::*;
pub use store::{InMemoryNoteStore, NoteStore};
pub use validation::{FieldIssue, ListParams, ValidationErrors};

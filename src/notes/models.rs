//! Note models and DTOs
//!
//! A note is a short titled piece of text. Notes live only in memory and carry
//! their own creation and modification timestamps.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length, in characters, after trimming
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum content length, in characters, after trimming
pub const CONTENT_MAX_CHARS: usize = 10_000;

// ============================================================================
// Note
// ============================================================================

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, assigned at creation and never changed
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// When the note was last modified (equals `created_at` until the first update)
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note with a fresh id and identical timestamps.
    ///
    /// Callers are expected to pass already-validated (trimmed) values.
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite title and content, refreshing `updated_at`
    pub fn replace(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.touch();
    }

    /// Merge the fields present in `patch`, refreshing `updated_at`
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.touch();
    }

    /// Case-insensitive substring match on title or content.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }

    /// Refresh `updated_at`. Strictly increasing even if the clock has not moved.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

// ============================================================================
// DTOs for API
// ============================================================================

/// Raw body of `POST`, `PUT` and `PATCH` requests, before validation.
///
/// Both fields are optional at this stage so that a missing field is reported
/// as a field issue rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A validated, complete title/content pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

/// A validated partial update; at least one field is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Pagination metadata for list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Page actually returned, clamped to `[1, total_pages]`
    pub page: usize,
    pub limit: usize,
    /// Number of notes matching the filter
    pub total: usize,
    /// Always at least 1, even when nothing matches
    pub total_pages: usize,
}

impl PageMeta {
    /// Compute page metadata, clamping the requested page into range.
    ///
    /// `limit` must be non-zero.
    pub fn new(requested_page: usize, limit: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(limit).max(1);
        Self {
            page: requested_page.clamp(1, total_pages),
            limit,
            total,
            total_pages,
        }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

/// Acknowledgment returned by `DELETE /notes/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_has_equal_timestamps() {
        let note = Note::new("Title".into(), "Body".into());
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.title, "Title");
        assert_eq!(note.content, "Body");
    }

    #[test]
    fn test_serializes_camel_case() {
        let note = Note::new("t".into(), "c".into());
        let json = serde_json::to_value(&note).unwrap();
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["id"], note.id.to_string());
    }

    #[test]
    fn test_apply_keeps_missing_fields() {
        let mut note = Note::new("Keep me".into(), "old".into());
        let created_at = note.created_at;
        note.apply(NotePatch {
            title: None,
            content: Some("new".into()),
        });
        assert_eq!(note.title, "Keep me");
        assert_eq!(note.content, "new");
        assert_eq!(note.created_at, created_at);
        assert!(note.updated_at > created_at);
    }

    #[test]
    fn test_replace_advances_updated_at() {
        let mut note = Note::new("a".into(), "b".into());
        let before = note.updated_at;
        note.replace("c".into(), "d".into());
        note.replace("e".into(), "f".into());
        assert!(note.updated_at > before);
        assert_eq!(note.title, "e");
    }

    #[test]
    fn test_page_meta_clamps_page() {
        let meta = PageMeta::new(99, 10, 3);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.offset(), 0);

        let meta = PageMeta::new(3, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.page, 3);
        assert_eq!(meta.offset(), 20);

        let meta = PageMeta::new(4, 5, 20);
        assert_eq!(meta.page, 4);
        assert_eq!(meta.total_pages, 4);
    }

    #[test]
    fn test_page_meta_empty() {
        let meta = PageMeta::new(5, 10, 0);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.total, 0);
    }

    #[test]
    fn test_page_meta_serializes_camel_case() {
        let json = serde_json::to_value(PageMeta::new(1, 10, 11)).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["page"], 1);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let note = Note::new("Shopping LIST".into(), "Milk and ABC cereal".into());
        assert!(note.matches("list"));
        assert!(note.matches("abc"));
        assert!(!note.matches("xyz"));
    }
}

//! Input validation for note payloads and list queries
//!
//! Every check collects all failing fields instead of stopping at the first
//! one, so a client gets the full picture in a single response.

use super::models::{NoteBody, NoteInput, NotePatch, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use serde::Serialize;
use std::fmt;
use std::num::IntErrorKind;
use thiserror::Error;

/// Default page for list queries
pub const DEFAULT_PAGE: usize = 1;
/// Default page size for list queries
pub const DEFAULT_LIMIT: usize = 10;
/// Largest accepted page size
pub const MAX_LIMIT: usize = 100;

/// A single constraint violation on one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// One or more field issues. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input: {}", join_issues(.issues))]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Build an error from a single issue
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(field, message)],
        }
    }

    /// Turn an accumulated issue list into a result
    fn check(issues: Vec<FieldIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }
}

// ============================================================================
// Field rules
// ============================================================================

/// Trim `value` and check it is non-empty and at most `max` characters
fn text_field(
    field: &str,
    value: &str,
    max: usize,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(FieldIssue::new(field, "must not be empty"));
        return None;
    }
    if trimmed.chars().count() > max {
        issues.push(FieldIssue::new(
            field,
            format!("must be at most {} characters", max),
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn required_text_field(
    field: &str,
    value: Option<&str>,
    max: usize,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match value {
        Some(v) => text_field(field, v, max, issues),
        None => {
            issues.push(FieldIssue::new(field, "is required"));
            None
        }
    }
}

fn optional_text_field(
    field: &str,
    value: Option<&str>,
    max: usize,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    value.and_then(|v| text_field(field, v, max, issues))
}

// ============================================================================
// Schemas
// ============================================================================

/// Validate a create (or full replacement) payload: both fields required
pub fn validate_create(body: &NoteBody) -> Result<NoteInput, ValidationErrors> {
    let mut issues = Vec::new();
    let title = required_text_field("title", body.title.as_deref(), TITLE_MAX_CHARS, &mut issues);
    let content = required_text_field(
        "content",
        body.content.as_deref(),
        CONTENT_MAX_CHARS,
        &mut issues,
    );

    match (title, content) {
        (Some(title), Some(content)) if issues.is_empty() => Ok(NoteInput { title, content }),
        _ => Err(ValidationErrors { issues }),
    }
}

/// Validate a partial update: same rules per field, at least one field present
pub fn validate_update(body: &NoteBody) -> Result<NotePatch, ValidationErrors> {
    if body.title.is_none() && body.content.is_none() {
        return Err(ValidationErrors::single(
            "body",
            "at least one of title or content must be provided",
        ));
    }

    let mut issues = Vec::new();
    let title = optional_text_field("title", body.title.as_deref(), TITLE_MAX_CHARS, &mut issues);
    let content = optional_text_field(
        "content",
        body.content.as_deref(),
        CONTENT_MAX_CHARS,
        &mut issues,
    );

    ValidationErrors::check(issues)?;
    Ok(NotePatch { title, content })
}

/// Validated list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: usize,
    pub limit: usize,
    /// Trimmed search keyword
    pub q: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            q: None,
        }
    }
}

/// Parse an optional integer query value. Empty strings mean "use the default".
fn integer_param(
    field: &str,
    raw: Option<&str>,
    default: usize,
    min: usize,
    max: Option<usize>,
    issues: &mut Vec<FieldIssue>,
) -> usize {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return default,
    };
    // Digits beyond i64 are still integers, just out of range
    let n = match raw.parse::<i64>() {
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
        Err(_) => {
            issues.push(FieldIssue::new(field, "must be an integer"));
            return default;
        }
    };
    if n < min as i64 {
        issues.push(FieldIssue::new(field, format!("must be at least {}", min)));
        return default;
    }
    match max {
        Some(max) if n as u64 > max as u64 => {
            issues.push(FieldIssue::new(field, format!("must be at most {}", max)));
            default
        }
        _ => usize::try_from(n).unwrap_or(usize::MAX),
    }
}

/// Validate list query parameters given as raw query-string values
pub fn validate_list_query(
    page: Option<&str>,
    limit: Option<&str>,
    q: Option<&str>,
) -> Result<ListParams, ValidationErrors> {
    let mut issues = Vec::new();
    let page = integer_param("page", page, DEFAULT_PAGE, 1, None, &mut issues);
    let limit = integer_param("limit", limit, DEFAULT_LIMIT, 1, Some(MAX_LIMIT), &mut issues);
    let q = match q.map(str::trim) {
        Some("") => {
            issues.push(FieldIssue::new("q", "must not be empty"));
            None
        }
        Some(s) => Some(s.to_string()),
        None => None,
    };

    ValidationErrors::check(issues)?;
    Ok(ListParams { page, limit, q })
}

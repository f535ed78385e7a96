//! Query parameter structs and the paginated response wrapper

use crate::notes::{validation, ListParams, PageMeta, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Raw query parameters for `GET /notes`.
///
/// Kept as strings so that malformed numbers become field issues during
/// validation instead of an opaque deserialization failure.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct NotesListQuery {
    /// Page number (default: 1)
    pub page: Option<String>,
    /// Items per page (default: 10, max: 100)
    pub limit: Option<String>,
    /// Case-insensitive keyword matched against title and content
    pub q: Option<String>,
}

impl NotesListQuery {
    /// Validate into typed list parameters
    pub fn validate(&self) -> Result<ListParams, ValidationErrors> {
        validation::validate_list_query(
            self.page.as_deref(),
            self.limit.as_deref(),
            self.q.as_deref(),
        )
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }
}

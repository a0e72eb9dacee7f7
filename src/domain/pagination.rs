//! Offset-pagination envelope returned by the backend's list endpoints.

use serde::{Deserialize, Serialize};

/// Page size the proxy list always requests.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Standard pagination wrapper for list responses. Pages are zero-indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageableResponse<T> {
    /// The items on the current page, in backend order
    pub content: Vec<T>,
    /// Total number of items across all pages
    pub total_elements: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Zero-indexed current page
    pub current_page: i64,
    /// Applied page size
    pub size: i64,
    /// Whether a following page exists
    pub has_next: bool,
    /// Whether a preceding page exists
    pub has_previous: bool,
}

impl<T> PageableResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

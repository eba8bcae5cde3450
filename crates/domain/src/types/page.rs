//! Pagination envelope and query parameters
//!
//! Every list endpoint returns a [`Page`]; the caller keeps requesting the
//! next page while [`Page::has_more`] holds (the original UI's
//! infinite-scroll page increment).

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};

/// One page of a list endpoint's results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number this envelope covers
    pub page: u32,
    pub per_page: u32,
    /// Total item count across all pages
    pub total: u64,
}

impl<T> Page<T> {
    /// Whether another page exists after this one
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }
}

/// Query parameters for paginated requests
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, per_page: DEFAULT_PER_PAGE }
    }
}

impl PageQuery {
    /// Page `page` with the default page size
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self { page, ..Self::default() }
    }

    /// Set the page size, clamped to the backend maximum
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// The query for the page after `self`
    #[must_use]
    pub fn next(self) -> Self {
        Self { page: self.page.saturating_add(1), per_page: self.per_page }
    }
}

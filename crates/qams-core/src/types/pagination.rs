//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size accepted by the backend list endpoints.
const MAX_PAGE_SIZE: u64 = 1000;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping to valid bounds.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The first page with the given size.
    pub fn first(limit: u64) -> Self {
        Self::new(1, limit)
    }

    /// The same page size on another page.
    pub fn with_page(self, page: u64) -> Self {
        Self::new(page, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated list returned by the backend.
///
/// The backend names the item list `data` on most resources and `items`
/// on some; both are accepted. Missing counters fall back to a single
/// empty page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// The items on this page, in backend order.
    #[serde(alias = "items", default = "Vec::new")]
    pub data: Vec<T>,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
    /// Current page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(alias = "pageSize", default = "default_page_size")]
    pub limit: u64,
    /// Total number of pages.
    #[serde(default = "default_page")]
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Wrap an unpaginated list (a bare array response) as a single page.
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            limit: total.max(1),
            data: items,
            total,
            page: 1,
            total_pages: 1,
        }
    }

    /// An empty first page.
    pub fn empty(request: &PageRequest) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page: request.page,
            limit: request.limit,
            total_pages: 1,
        }
    }

    /// Whether a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page before this one exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

//! One page of activity log results.

use serde::{Deserialize, Serialize};

use super::model::ActivityLogEntry;

/// A page of audit entries with the backend's pagination metadata.
///
/// `total_pages`, `has_next_page`, and `has_previous_page` are taken from
/// the backend as-is, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogPage {
    /// Entries in backend order (reverse-chronological).
    #[serde(default)]
    pub items: Vec<ActivityLogEntry>,
    /// Total number of matching entries.
    #[serde(default)]
    pub total: u64,
    /// Current page (1-based).
    #[serde(default = "default_one")]
    pub page: u64,
    /// Entries per page.
    #[serde(default)]
    pub page_size: u64,
    /// Total number of pages.
    #[serde(default = "default_one")]
    pub total_pages: u64,
    /// Whether another page follows.
    #[serde(default)]
    pub has_next_page: bool,
    /// Whether a page precedes this one.
    #[serde(default)]
    pub has_previous_page: bool,
}

impl ActivityLogPage {
    /// An empty first page.
    pub fn empty(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            total_pages: 1,
            has_next_page: false,
            has_previous_page: false,
        }
    }
}

fn default_one() -> u64 {
    1
}

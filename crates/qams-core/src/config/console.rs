//! List, filter, and autocomplete configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Behaviour of the list views, the activity-log engine, and the actor
/// autocomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Quiet period in milliseconds before a filter edit issues a fetch.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
    /// Page size of the activity-log view.
    #[serde(default = "default_activity_page_size")]
    pub activity_page_size: u64,
    /// Minimum number of characters before the actor search is issued.
    #[serde(default = "default_actor_min_chars")]
    pub actor_min_chars: usize,
    /// Maximum number of actor suggestions requested.
    #[serde(default = "default_actor_limit")]
    pub actor_suggestion_limit: u64,
    /// Page size of the entity list views.
    #[serde(default = "default_list_page_size")]
    pub list_page_size: u64,
    /// Page size used for dropdown lookups (roles, departments, clients).
    #[serde(default = "default_lookup_limit")]
    pub lookup_limit: u64,
}

impl ConsoleConfig {
    /// Debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            activity_page_size: default_activity_page_size(),
            actor_min_chars: default_actor_min_chars(),
            actor_suggestion_limit: default_actor_limit(),
            list_page_size: default_list_page_size(),
            lookup_limit: default_lookup_limit(),
        }
    }
}

fn default_debounce() -> u64 {
    300
}

fn default_activity_page_size() -> u64 {
    20
}

fn default_actor_min_chars() -> usize {
    2
}

fn default_actor_limit() -> u64 {
    10
}

fn default_list_page_size() -> u64 {
    10
}

fn default_lookup_limit() -> u64 {
    100
}

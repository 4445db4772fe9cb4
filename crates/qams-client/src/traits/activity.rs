//! Activity log and actor lookup traits.

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_entity::activity::ActivityLogPage;
use qams_entity::user::UserSummary;

use crate::resources::activity_logs::ActivityLogQuery;

/// Source of activity log pages.
#[async_trait]
pub trait ActivityLogSource: Send + Sync + 'static {
    /// Fetch one page of entries matching `query`.
    async fn fetch_page(&self, query: &ActivityLogQuery) -> AppResult<ActivityLogPage>;
}

/// Free-text user search used by the actor autocomplete.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Return at most `limit` users whose name or email matches `text`.
    async fn search_users(&self, text: &str, limit: u64) -> AppResult<Vec<UserSummary>>;
}

//! Activity log query engine.
//!
//! Holds the filter and page state of the audit-trail view, turns it into
//! backend queries, and exposes the latest page of results. Filter edits
//! are debounced and always restart at page 1; responses to superseded
//! requests are discarded; a failed fetch keeps the previous page on
//! screen next to the error.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use qams_client::traits::ActivityLogSource;
use qams_core::config::ConsoleConfig;
use qams_entity::activity::ActivityLogPage;

use super::filters::ActivityLogFilters;
use crate::debounce::Debouncer;
use crate::sequence::RequestSequence;

/// Shown when a fetch fails without a backend message.
pub const FETCH_FAILED: &str = "Failed to fetch activity logs";

/// Snapshot of the activity log view.
#[derive(Debug, Clone, Default)]
pub struct ActivityLogState {
    /// Active filters.
    pub filters: ActivityLogFilters,
    /// Page currently on screen; moves only when a fetch succeeds.
    pub page: u64,
    /// Page of the most recent request, retried by `refresh`.
    pub requested_page: u64,
    /// Last successfully loaded page; `None` until the first success.
    pub result: Option<ActivityLogPage>,
    /// Error of the most recent fetch, cleared by the next success.
    pub error: Option<String>,
    /// Whether the latest request is in flight.
    pub is_loading: bool,
}

impl ActivityLogState {
    /// Whether the view should show the empty first-load state.
    pub fn is_empty(&self) -> bool {
        self.result.as_ref().is_none_or(|p| p.items.is_empty())
    }
}

struct Shared {
    source: Arc<dyn ActivityLogSource>,
    state: RwLock<ActivityLogState>,
    sequence: RequestSequence,
    page_size: u64,
}

impl Shared {
    async fn fetch(&self, filters: ActivityLogFilters, page: u64) {
        let ticket = self.sequence.issue();
        let query = filters.to_query(page, self.page_size);
        {
            let mut state = self.write();
            state.requested_page = query.page;
            state.is_loading = true;
        }

        let outcome = self.source.fetch_page(&query).await;

        if !self.sequence.is_latest(ticket) {
            debug!(page, "Discarding superseded activity log response");
            return;
        }

        let mut state = self.write();
        state.is_loading = false;
        match outcome {
            Ok(result) => {
                debug!(page, items = result.items.len(), total = result.total, "Activity logs loaded");
                state.page = query.page;
                state.result = Some(result);
                state.error = None;
            }
            Err(e) => {
                warn!(page, error = %e, "Activity log fetch failed");
                state.error = Some(e.user_message_or(FETCH_FAILED));
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ActivityLogState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ActivityLogState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }
}

/// Drives the activity log view.
pub struct ActivityLogEngine {
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl std::fmt::Debug for ActivityLogEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLogEngine")
            .field("page_size", &self.shared.page_size)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl ActivityLogEngine {
    /// Create an engine using the page size and debounce window from
    /// `config`.
    pub fn new(source: Arc<dyn ActivityLogSource>, config: &ConsoleConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                state: RwLock::new(ActivityLogState {
                    page: 1,
                    requested_page: 1,
                    ..ActivityLogState::default()
                }),
                sequence: RequestSequence::new(),
                page_size: config.activity_page_size.max(1),
            }),
            debouncer: Debouncer::new(config.debounce()),
        }
    }

    /// A copy of the current view state.
    pub fn state(&self) -> ActivityLogState {
        self.shared.read().clone()
    }

    /// Entries per page.
    pub fn page_size(&self) -> u64 {
        self.shared.page_size
    }

    /// Load the first page with the current filters, immediately.
    pub async fn load(&self) {
        self.debouncer.cancel();
        let filters = self.shared.read().filters.clone();
        self.shared.fetch(filters, 1).await;
    }

    /// Replace the filters. Resets to page 1 and fetches once the quiet
    /// period elapses without another edit.
    pub fn set_filters(&self, filters: ActivityLogFilters) {
        {
            let mut state = self.shared.write();
            if state.filters == filters {
                return;
            }
            state.filters = filters.clone();
            state.page = 1;
            state.requested_page = 1;
        }
        let shared = self.shared.clone();
        self.debouncer.schedule(async move {
            shared.fetch(filters, 1).await;
        });
    }

    /// Edit the filters in place; see [`set_filters`](Self::set_filters).
    pub fn update_filters(&self, edit: impl FnOnce(&mut ActivityLogFilters)) {
        let mut filters = self.shared.read().filters.clone();
        edit(&mut filters);
        self.set_filters(filters);
    }

    /// Reset every filter.
    pub fn clear_filters(&self) {
        self.set_filters(ActivityLogFilters::default());
    }

    /// Fetch `page` with the current filters, immediately.
    pub async fn go_to_page(&self, page: u64) {
        self.debouncer.cancel();
        let filters = self.shared.read().filters.clone();
        self.shared.fetch(filters, page.max(1)).await;
    }

    /// Next page, if the backend reports one.
    pub async fn next_page(&self) {
        let (has_next, page) = {
            let state = self.shared.read();
            (state.result.as_ref().is_some_and(|r| r.has_next_page), state.page)
        };
        if has_next {
            self.go_to_page(page + 1).await;
        }
    }

    /// Previous page, if the backend reports one.
    pub async fn previous_page(&self) {
        let (has_previous, page) = {
            let state = self.shared.read();
            (state.result.as_ref().is_some_and(|r| r.has_previous_page), state.page)
        };
        if has_previous {
            self.go_to_page(page.saturating_sub(1)).await;
        }
    }

    /// Re-fetch the last requested page (the error banner's retry action).
    pub async fn refresh(&self) {
        let page = self.shared.read().requested_page;
        self.go_to_page(page).await;
    }

    /// Wait for a pending debounced fetch to finish.
    pub async fn settle(&self) {
        self.debouncer.settle().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use qams_client::resources::ActivityLogQuery;
    use qams_core::error::AppError;
    use qams_core::result::AppResult;
    use qams_entity::activity::{EntityTag, Operation};

    /// Records queries; replies after a per-entity delay.
    #[derive(Default)]
    struct FakeSource {
        queries: Mutex<Vec<ActivityLogQuery>>,
        delays: HashMap<String, Duration>,
        fail: Mutex<bool>,
    }

    impl FakeSource {
        fn queries(&self) -> Vec<ActivityLogQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    fn page_for(query: &ActivityLogQuery) -> ActivityLogPage {
        let entity = query
            .entity_type
            .as_ref()
            .map(|e| e.as_str().to_string())
            .unwrap_or_else(|| "user".into());
        serde_json::from_value(json!({
            "items": [{
                "_id": format!("log-{entity}-{}", query.page),
                "entity": entity,
                "entityId": "e1",
                "entityName": "Thing",
                "operation": "update",
                "by": "u1",
                "ts": "2024-01-05T12:00:00Z"
            }],
            "total": 45,
            "page": query.page,
            "pageSize": query.page_size,
            "totalPages": 3,
            "hasNextPage": query.page < 3,
            "hasPreviousPage": query.page > 1
        }))
        .unwrap()
    }

    #[async_trait]
    impl ActivityLogSource for FakeSource {
        async fn fetch_page(&self, query: &ActivityLogQuery) -> AppResult<ActivityLogPage> {
            self.queries.lock().unwrap().push(query.clone());
            let key = query
                .entity_type
                .as_ref()
                .map(|e| e.as_str().to_string())
                .unwrap_or_default();
            if let Some(delay) = self.delays.get(&key) {
                tokio::time::sleep(*delay).await;
            }
            if *self.fail.lock().unwrap() {
                return Err(AppError::from_status(500, "Database unavailable"));
            }
            Ok(page_for(query))
        }
    }

    fn engine(source: Arc<FakeSource>) -> ActivityLogEngine {
        ActivityLogEngine::new(source, &ConsoleConfig::default())
    }

    fn first_id(engine: &ActivityLogEngine) -> String {
        engine.state().result.unwrap().items[0].id.to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_resets_page() {
        let source = Arc::new(FakeSource::default());
        let engine = engine(source.clone());
        engine.load().await;
        engine.go_to_page(3).await;
        assert_eq!(engine.state().page, 3);

        engine.update_filters(|f| f.operation = Some(Operation::Delete));
        assert_eq!(engine.state().page, 1);
        engine.settle().await;

        let last = source.queries().pop().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.page_size, 20);
        assert_eq!(last.operation, Some(Operation::Delete));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_are_debounced() {
        let source = Arc::new(FakeSource::default());
        let engine = engine(source.clone());

        for text in ["S", "St", "St.", "St. M"] {
            engine.update_filters(|f| f.entity_name = Some(text.to_string()));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(source.queries().is_empty());

        engine.settle().await;
        let queries = source.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].entity_name.as_deref(), Some("St. M"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_overwrites_newer() {
        let mut delays = HashMap::new();
        delays.insert("role".to_string(), Duration::from_millis(1000));
        delays.insert("client".to_string(), Duration::from_millis(10));
        let source = Arc::new(FakeSource {
            delays,
            ..FakeSource::default()
        });
        let engine = Arc::new(engine(source.clone()));

        // A: slow request for roles.
        engine.update_filters(|f| f.entity_type = Some(EntityTag::new("role")));
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(source.queries().len(), 1);

        // B: fast request for clients, issued while A is in flight.
        engine.update_filters(|f| f.entity_type = Some(EntityTag::new("client")));
        engine.settle().await;
        assert_eq!(first_id(&engine), "log-client-1");

        // A resolves afterwards and must be discarded.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(first_id(&engine), "log-client-1");
        assert!(!engine.state().is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_preserves_previous_page() {
        let source = Arc::new(FakeSource::default());
        let engine = engine(source.clone());
        engine.load().await;
        assert!(engine.state().result.is_some());

        *source.fail.lock().unwrap() = true;
        engine.go_to_page(2).await;
        let state = engine.state();
        assert_eq!(state.error.as_deref(), Some("Database unavailable"));
        assert_eq!(first_id(&engine), "log-user-1");
        assert!(!state.is_loading);

        *source.fail.lock().unwrap() = false;
        engine.refresh().await;
        assert!(engine.state().error.is_none());
        assert_eq!(first_id(&engine), "log-user-2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_jump_does_not_move_the_page() {
        let source = Arc::new(FakeSource::default());
        let engine = engine(source.clone());
        engine.load().await;

        *source.fail.lock().unwrap() = true;
        engine.go_to_page(3).await;
        let state = engine.state();
        assert_eq!(state.page, 1);
        assert_eq!(state.requested_page, 3);

        *source.fail.lock().unwrap() = false;
        engine.next_page().await;
        assert_eq!(engine.state().page, 2);
        assert_eq!(first_id(&engine), "log-user-2");
        let pages: Vec<u64> = source.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 3, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_load_failure_shows_empty_state() {
        let source = Arc::new(FakeSource::default());
        *source.fail.lock().unwrap() = true;
        let engine = engine(source);
        engine.load().await;
        let state = engine.state();
        assert!(state.result.is_none());
        assert!(state.is_empty());
        assert!(state.error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pagination_follows_backend_flags() {
        let source = Arc::new(FakeSource::default());
        let engine = engine(source.clone());
        engine.load().await;
        engine.previous_page().await;
        assert_eq!(source.queries().len(), 1);

        engine.next_page().await;
        engine.next_page().await;
        engine.next_page().await;
        let pages: Vec<u64> = source.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }
}

//! Paginated, filterable list state for one resource collection.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use qams_client::traits::Resource;
use qams_core::config::ConsoleConfig;
use qams_core::types::PageRequest;

use crate::debounce::Debouncer;
use crate::sequence::RequestSequence;

/// Snapshot of a list view.
pub struct ListState<R: Resource> {
    /// Active filters.
    pub filters: R::Filters,
    /// Page currently on screen; moves only when a fetch succeeds.
    pub page: u64,
    /// Page of the most recent request, retried by `refresh`.
    pub requested_page: u64,
    /// Items of the last successfully loaded page.
    pub items: Vec<R::Item>,
    /// Total items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Error of the most recent fetch, cleared by the next success.
    pub error: Option<String>,
    /// Whether the latest request is in flight.
    pub is_loading: bool,
    /// Whether any fetch has succeeded yet.
    pub loaded_once: bool,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self {
            filters: R::Filters::default(),
            page: 1,
            requested_page: 1,
            items: Vec::new(),
            total: 0,
            total_pages: 1,
            error: None,
            is_loading: false,
            loaded_once: false,
        }
    }
}

impl<R: Resource> Clone for ListState<R> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            page: self.page,
            requested_page: self.requested_page,
            items: self.items.clone(),
            total: self.total,
            total_pages: self.total_pages,
            error: self.error.clone(),
            is_loading: self.is_loading,
            loaded_once: self.loaded_once,
        }
    }
}

impl<R: Resource> std::fmt::Debug for ListState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListState")
            .field("filters", &self.filters)
            .field("page", &self.page)
            .field("requested_page", &self.requested_page)
            .field("items", &self.items)
            .field("total", &self.total)
            .field("total_pages", &self.total_pages)
            .field("error", &self.error)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

impl<R: Resource> ListState<R> {
    /// Whether a page after the current one exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page before the current one exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

struct Shared<R: Resource> {
    resource: Arc<R>,
    state: RwLock<ListState<R>>,
    sequence: RequestSequence,
    page_size: u64,
}

impl<R: Resource> Shared<R> {
    async fn fetch(&self, filters: R::Filters, page: u64) {
        let ticket = self.sequence.issue();
        let request = PageRequest::new(page, self.page_size);
        {
            let mut state = self.write();
            state.requested_page = request.page;
            state.is_loading = true;
        }

        let outcome = self.resource.list(&filters, request).await;

        if !self.sequence.is_latest(ticket) {
            debug!(entity = R::ENTITY, page, "Discarding superseded list response");
            return;
        }

        let mut state = self.write();
        state.is_loading = false;
        match outcome {
            Ok(result) => {
                debug!(entity = R::ENTITY, page, items = result.data.len(), "List loaded");
                state.page = request.page;
                state.total = result.total;
                state.total_pages = result.total_pages.max(1);
                state.items = result.data;
                state.error = None;
                state.loaded_once = true;
            }
            Err(e) => {
                warn!(entity = R::ENTITY, page, error = %e, "List fetch failed");
                let fallback = format!("Failed to fetch {}s", R::ENTITY.to_lowercase());
                state.error = Some(e.user_message_or(&fallback));
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ListState<R>> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ListState<R>> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }
}

/// Drives the list screen of one resource.
///
/// Cloning is cheap; clones share state, so a form modal can hold one to
/// refresh the list after a save.
pub struct ListView<R: Resource> {
    shared: Arc<Shared<R>>,
    debouncer: Arc<Debouncer>,
}

impl<R: Resource> Clone for ListView<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            debouncer: self.debouncer.clone(),
        }
    }
}

impl<R: Resource> std::fmt::Debug for ListView<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("entity", &R::ENTITY)
            .field("page_size", &self.shared.page_size)
            .finish()
    }
}

impl<R: Resource> ListView<R> {
    /// Create a view with the list page size and debounce window from
    /// `config`.
    pub fn new(resource: Arc<R>, config: &ConsoleConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                resource,
                state: RwLock::new(ListState::default()),
                sequence: RequestSequence::new(),
                page_size: config.list_page_size.max(1),
            }),
            debouncer: Arc::new(Debouncer::new(config.debounce())),
        }
    }

    /// The underlying resource.
    pub fn resource(&self) -> &Arc<R> {
        &self.shared.resource
    }

    /// A copy of the current view state.
    pub fn state(&self) -> ListState<R> {
        self.shared.read().clone()
    }

    /// Load the first page with the current filters, immediately.
    pub async fn load(&self) {
        self.go_to_page(1).await;
    }

    /// Replace the filters; fetches page 1 after the quiet period.
    pub fn set_filters(&self, filters: R::Filters) {
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

    /// Fetch `page` with the current filters, immediately.
    pub async fn go_to_page(&self, page: u64) {
        self.debouncer.cancel();
        let filters = self.shared.read().filters.clone();
        self.shared.fetch(filters, page.max(1)).await;
    }

    /// Re-fetch the last requested page.
    pub async fn refresh(&self) {
        let page = self.shared.read().requested_page;
        self.go_to_page(page).await;
    }

    /// Wait for a pending debounced fetch to finish.
    pub async fn settle(&self) {
        self.debouncer.settle().await;
    }
}

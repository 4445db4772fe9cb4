//! Generic CRUD resource trait.

use std::fmt::{Debug, Display};

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_core::types::{PageRequest, Paginated};

/// A backend collection the list views and form modals operate on.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Entity returned by the backend.
    type Item: Clone + Debug + Send + Sync + 'static;
    /// Identifier of an entity.
    type Id: Clone + Display + Send + Sync + 'static;
    /// List filters; `Default` means "no filter".
    type Filters: Clone + Debug + Default + PartialEq + Send + Sync + 'static;
    /// Create payload.
    type Create: Send + Sync + 'static;
    /// Update payload.
    type Update: Send + Sync + 'static;

    /// Singular display name (e.g. `"Client"`).
    const ENTITY: &'static str;

    /// Fetch one page of items.
    async fn list(&self, filters: &Self::Filters, page: PageRequest) -> AppResult<Paginated<Self::Item>>;

    /// Create an item.
    async fn create(&self, payload: &Self::Create) -> AppResult<Self::Item>;

    /// Update an item.
    async fn update(&self, id: &Self::Id, payload: &Self::Update) -> AppResult<Self::Item>;

    /// Delete an item.
    async fn delete(&self, id: &Self::Id) -> AppResult<()>;
}

//! Resource query modules, one per backend collection.
//!
//! Each module builds the query parameters for its list endpoint, calls
//! the [`ApiGateway`](crate::ApiGateway), and normalizes the response
//! into a [`Paginated`] page.

pub mod accreditations;
pub mod activity_logs;
pub mod auth;
pub mod clients;
pub mod departments;
pub mod questions;
pub mod roles;
pub mod templates;
pub mod users;

use serde::Deserialize;

use qams_core::types::{PageRequest, Paginated, QueryParams};

pub use accreditations::AccreditationsApi;
pub use activity_logs::{ActivityLogQuery, ActivityLogsApi};
pub use auth::AuthApi;
pub use clients::{ClientFilters, ClientsApi};
pub use departments::{DepartmentFilters, DepartmentsApi};
pub use questions::{QuestionFilters, QuestionsApi};
pub use roles::{RoleFilters, RolesApi};
pub use templates::{TemplateFilters, TemplatesApi};
pub use users::{UserFilters, UsersApi};

/// A list response, either a bare array or a paginated object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    /// Bare array of items.
    Items(Vec<T>),
    /// Paginated object (`data`/`items` plus counters).
    Page(Paginated<T>),
}

impl<T> From<ListBody<T>> for Paginated<T> {
    fn from(body: ListBody<T>) -> Self {
        match body {
            ListBody::Items(items) => Paginated::from_items(items),
            ListBody::Page(page) => page,
        }
    }
}

/// `page` and `limit` query parameters.
pub(crate) fn page_params(page: PageRequest) -> QueryParams {
    QueryParams::new()
        .with("page", page.page)
        .with("limit", page.limit)
}

//! User endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use qams_core::result::AppResult;
use qams_core::types::{ClientId, PageRequest, Paginated, QueryParams, UserId};
use qams_entity::user::{CreateUser, UpdatePassword, UpdateUser, User, UserStatus, UserSummary};

use super::{ListBody, page_params};
use crate::gateway::ApiGateway;
use crate::traits::{Resource, UserDirectory};

/// User list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    /// Free-text name/email search.
    pub search: Option<String>,
    /// Account status.
    pub status: Option<UserStatus>,
    /// Client membership.
    pub client_id: Option<ClientId>,
}

impl UserFilters {
    /// Query parameters for this filter set on `page`.
    pub fn to_params(&self, page: PageRequest) -> QueryParams {
        page_params(page)
            .with_opt("clientId", self.client_id.as_ref())
            .with_opt("search", self.search.as_deref())
            .with_opt("status", self.status)
    }
}

/// `/users` endpoints.
#[derive(Debug, Clone)]
pub struct UsersApi {
    gateway: Arc<ApiGateway>,
}

impl UsersApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a single user.
    pub async fn get(&self, id: &UserId) -> AppResult<User> {
        self.gateway
            .get(&format!("/users/{id}"), &QueryParams::new())
            .await
    }

    /// Change a user's password.
    pub async fn update_password(&self, id: &UserId, payload: &UpdatePassword) -> AppResult<()> {
        self.gateway
            .patch::<Value, _>(&format!("/users/{id}/password"), payload)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl Resource for UsersApi {
    type Item = User;
    type Id = UserId;
    type Filters = UserFilters;
    type Create = CreateUser;
    type Update = UpdateUser;

    const ENTITY: &'static str = "User";

    async fn list(&self, filters: &UserFilters, page: PageRequest) -> AppResult<Paginated<User>> {
        let body: ListBody<User> = self.gateway.get("/users", &filters.to_params(page)).await?;
        Ok(body.into())
    }

    async fn create(&self, payload: &CreateUser) -> AppResult<User> {
        self.gateway.post("/users", payload).await
    }

    async fn update(&self, id: &UserId, payload: &UpdateUser) -> AppResult<User> {
        self.gateway.patch(&format!("/users/{id}"), payload).await
    }

    async fn delete(&self, id: &UserId) -> AppResult<()> {
        self.gateway.delete(&format!("/users/{id}")).await
    }
}

#[async_trait]
impl UserDirectory for UsersApi {
    async fn search_users(&self, text: &str, limit: u64) -> AppResult<Vec<UserSummary>> {
        let filters = UserFilters {
            search: Some(text.to_string()),
            ..UserFilters::default()
        };
        let page = self.list(&filters, PageRequest::first(limit)).await?;
        debug!(matches = page.data.len(), "User directory search complete");
        Ok(page.data.iter().map(User::summary).collect())
    }
}

//! Role endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_core::types::{ClientId, PageRequest, Paginated, QueryParams, RoleId};
use qams_entity::role::{CreateRole, Role, UpdateRole};

use super::{ListBody, page_params};
use crate::gateway::ApiGateway;
use crate::traits::Resource;

/// Role list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleFilters {
    /// Owning client.
    pub client_id: Option<ClientId>,
}

/// `/roles` endpoints.
#[derive(Debug, Clone)]
pub struct RolesApi {
    gateway: Arc<ApiGateway>,
}

impl RolesApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a single role.
    pub async fn get(&self, id: &RoleId) -> AppResult<Role> {
        self.gateway
            .get(&format!("/roles/{id}"), &QueryParams::new())
            .await
    }
}

#[async_trait]
impl Resource for RolesApi {
    type Item = Role;
    type Id = RoleId;
    type Filters = RoleFilters;
    type Create = CreateRole;
    type Update = UpdateRole;

    const ENTITY: &'static str = "Role";

    async fn list(&self, filters: &RoleFilters, page: PageRequest) -> AppResult<Paginated<Role>> {
        let query = page_params(page).with_opt("clientId", filters.client_id.as_ref());
        let body: ListBody<Role> = self.gateway.get("/roles", &query).await?;
        Ok(body.into())
    }

    async fn create(&self, payload: &CreateRole) -> AppResult<Role> {
        self.gateway.post("/roles", payload).await
    }

    async fn update(&self, id: &RoleId, payload: &UpdateRole) -> AppResult<Role> {
        self.gateway.patch(&format!("/roles/{id}"), payload).await
    }

    async fn delete(&self, id: &RoleId) -> AppResult<()> {
        self.gateway.delete(&format!("/roles/{id}")).await
    }
}

//! Department endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_core::types::{ClientId, DepartmentId, PageRequest, Paginated};
use qams_entity::department::{CreateDepartment, Department, UpdateDepartment};

use super::{ListBody, page_params};
use crate::gateway::ApiGateway;
use crate::traits::Resource;

/// Department list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentFilters {
    /// Owning client.
    pub client_id: Option<ClientId>,
}

/// `/departments` endpoints.
#[derive(Debug, Clone)]
pub struct DepartmentsApi {
    gateway: Arc<ApiGateway>,
}

impl DepartmentsApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Resource for DepartmentsApi {
    type Item = Department;
    type Id = DepartmentId;
    type Filters = DepartmentFilters;
    type Create = CreateDepartment;
    type Update = UpdateDepartment;

    const ENTITY: &'static str = "Department";

    async fn list(
        &self,
        filters: &DepartmentFilters,
        page: PageRequest,
    ) -> AppResult<Paginated<Department>> {
        let query = page_params(page).with_opt("clientId", filters.client_id.as_ref());
        let body: ListBody<Department> = self.gateway.get("/departments", &query).await?;
        Ok(body.into())
    }

    async fn create(&self, payload: &CreateDepartment) -> AppResult<Department> {
        self.gateway.post("/departments", payload).await
    }

    async fn update(&self, id: &DepartmentId, payload: &UpdateDepartment) -> AppResult<Department> {
        self.gateway
            .patch(&format!("/departments/{id}"), payload)
            .await
    }

    async fn delete(&self, id: &DepartmentId) -> AppResult<()> {
        self.gateway.delete(&format!("/departments/{id}")).await
    }
}

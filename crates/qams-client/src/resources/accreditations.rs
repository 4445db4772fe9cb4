//! Accreditation lookups.

use std::sync::Arc;

use qams_core::result::AppResult;
use qams_core::types::{AccreditationId, ClientId, Paginated, QueryParams};
use qams_entity::accreditation::Accreditation;

use super::ListBody;
use crate::gateway::ApiGateway;

/// Read-only `/accreditations` endpoints.
#[derive(Debug, Clone)]
pub struct AccreditationsApi {
    gateway: Arc<ApiGateway>,
}

impl AccreditationsApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// List accreditations. Without a client, only platform-wide schemes
    /// are returned.
    pub async fn list(&self, client_id: Option<&ClientId>) -> AppResult<Vec<Accreditation>> {
        let query = QueryParams::new().with_opt("clientId", client_id);
        let body: ListBody<Accreditation> = self.gateway.get("/accreditations", &query).await?;
        Ok(Paginated::from(body).data)
    }

    /// Fetch a single accreditation.
    pub async fn get(&self, id: &AccreditationId) -> AppResult<Accreditation> {
        self.gateway
            .get(&format!("/accreditations/{id}"), &QueryParams::new())
            .await
    }
}

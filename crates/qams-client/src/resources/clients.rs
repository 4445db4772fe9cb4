//! Client (tenant organization) endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use qams_core::result::AppResult;
use qams_core::types::{ClientId, PageRequest, Paginated, QueryParams, UserId};
use qams_entity::client::{Client, ClientMembership, CreateClient, UpdateClient};

use super::{ListBody, page_params};
use crate::gateway::ApiGateway;
use crate::traits::Resource;

/// Client list filters. The endpoint has no server-side search, so the
/// name filter is applied locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilters {
    /// Case-insensitive substring of the client name.
    pub search: Option<String>,
}

impl ClientFilters {
    fn matches(&self, client: &Client) -> bool {
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => client
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

/// `/clients` endpoints.
#[derive(Debug, Clone)]
pub struct ClientsApi {
    gateway: Arc<ApiGateway>,
}

impl ClientsApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a single client.
    pub async fn get(&self, id: &ClientId) -> AppResult<Client> {
        self.gateway
            .get(&format!("/clients/{id}"), &QueryParams::new())
            .await
    }

    /// Add a user to a client.
    pub async fn add_user(&self, id: &ClientId, user_id: &UserId) -> AppResult<Client> {
        let body = ClientMembership {
            user_id: user_id.clone(),
        };
        self.gateway
            .post(&format!("/clients/{id}/users"), &body)
            .await
    }

    /// Remove a user from a client.
    pub async fn remove_user(&self, id: &ClientId, user_id: &UserId) -> AppResult<()> {
        let body = ClientMembership {
            user_id: user_id.clone(),
        };
        self.gateway
            .request::<Value, _>(
                Method::DELETE,
                &format!("/clients/{id}/users"),
                &QueryParams::new(),
                Some(&body),
            )
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl Resource for ClientsApi {
    type Item = Client;
    type Id = ClientId;
    type Filters = ClientFilters;
    type Create = CreateClient;
    type Update = UpdateClient;

    const ENTITY: &'static str = "Client";

    async fn list(&self, filters: &ClientFilters, page: PageRequest) -> AppResult<Paginated<Client>> {
        let body: ListBody<Client> = self.gateway.get("/clients", &page_params(page)).await?;
        let mut result: Paginated<Client> = body.into();
        if filters.search.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            result.data.retain(|c| filters.matches(c));
            result.total = result.data.len() as u64;
        }
        Ok(result)
    }

    async fn create(&self, payload: &CreateClient) -> AppResult<Client> {
        self.gateway.post("/clients", payload).await
    }

    async fn update(&self, id: &ClientId, payload: &UpdateClient) -> AppResult<Client> {
        self.gateway.patch(&format!("/clients/{id}"), payload).await
    }

    async fn delete(&self, id: &ClientId) -> AppResult<()> {
        self.gateway.delete(&format!("/clients/{id}")).await
    }
}

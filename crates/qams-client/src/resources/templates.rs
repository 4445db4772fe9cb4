//! Onboarding template endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_core::types::{PageRequest, Paginated, QueryParams, TemplateId};
use qams_entity::template::{CreateTemplate, OnboardingTemplate, TemplateType, UpdateTemplate};

use super::{ListBody, page_params};
use crate::gateway::ApiGateway;
use crate::traits::Resource;

/// Template list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilters {
    /// Free-text search over key and name.
    pub search: Option<String>,
    /// Artefact category.
    pub template_type: Option<TemplateType>,
}

/// `/onboarding/templates` endpoints.
#[derive(Debug, Clone)]
pub struct TemplatesApi {
    gateway: Arc<ApiGateway>,
}

impl TemplatesApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a template by document id.
    pub async fn get(&self, id: &TemplateId) -> AppResult<OnboardingTemplate> {
        self.gateway
            .get(&format!("/onboarding/templates/{id}"), &QueryParams::new())
            .await
    }

    /// Fetch a template by its business key.
    pub async fn get_by_template_id(&self, template_id: &str) -> AppResult<OnboardingTemplate> {
        self.gateway
            .get(
                &format!("/onboarding/templates/template-id/{template_id}"),
                &QueryParams::new(),
            )
            .await
    }
}

#[async_trait]
impl Resource for TemplatesApi {
    type Item = OnboardingTemplate;
    type Id = TemplateId;
    type Filters = TemplateFilters;
    type Create = CreateTemplate;
    type Update = UpdateTemplate;

    const ENTITY: &'static str = "Template";

    async fn list(
        &self,
        filters: &TemplateFilters,
        page: PageRequest,
    ) -> AppResult<Paginated<OnboardingTemplate>> {
        let query = page_params(page)
            .with_opt("search", filters.search.as_deref())
            .with_opt("templateType", filters.template_type);
        let body: ListBody<OnboardingTemplate> =
            self.gateway.get("/onboarding/templates", &query).await?;
        Ok(body.into())
    }

    async fn create(&self, payload: &CreateTemplate) -> AppResult<OnboardingTemplate> {
        self.gateway.post("/onboarding/templates", payload).await
    }

    async fn update(&self, id: &TemplateId, payload: &UpdateTemplate) -> AppResult<OnboardingTemplate> {
        self.gateway
            .patch(&format!("/onboarding/templates/{id}"), payload)
            .await
    }

    async fn delete(&self, id: &TemplateId) -> AppResult<()> {
        self.gateway
            .delete(&format!("/onboarding/templates/{id}"))
            .await
    }
}

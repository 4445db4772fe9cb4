//! Onboarding question endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_core::types::{PageRequest, Paginated, QueryParams, QuestionId};
use qams_entity::question::{CreateQuestion, Question, QuestionType, UpdateQuestion};

use super::{ListBody, page_params};
use crate::gateway::ApiGateway;
use crate::traits::Resource;

/// Question list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilters {
    /// Free-text search over key and title.
    pub search: Option<String>,
    /// Facility type the question applies to.
    pub facility_type: Option<String>,
    /// Single or multiple choice.
    pub question_type: Option<QuestionType>,
    /// Active flag.
    pub is_active: Option<bool>,
}

impl QuestionFilters {
    /// Query parameters for this filter set on `page`.
    pub fn to_params(&self, page: PageRequest) -> QueryParams {
        page_params(page)
            .with_opt("facilityType", self.facility_type.as_deref())
            .with_opt("type", self.question_type)
            .with_opt("isActive", self.is_active)
            .with_opt("search", self.search.as_deref())
    }
}

/// `/onboarding/questions` endpoints.
#[derive(Debug, Clone)]
pub struct QuestionsApi {
    gateway: Arc<ApiGateway>,
}

impl QuestionsApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a question by document id.
    pub async fn get(&self, id: &QuestionId) -> AppResult<Question> {
        self.gateway
            .get(&format!("/onboarding/questions/{id}"), &QueryParams::new())
            .await
    }

    /// Fetch a question by its business key (e.g. `"Q1"`).
    pub async fn get_by_question_id(&self, question_id: &str) -> AppResult<Question> {
        self.gateway
            .get(
                &format!("/onboarding/questions/question-id/{question_id}"),
                &QueryParams::new(),
            )
            .await
    }
}

#[async_trait]
impl Resource for QuestionsApi {
    type Item = Question;
    type Id = QuestionId;
    type Filters = QuestionFilters;
    type Create = CreateQuestion;
    type Update = UpdateQuestion;

    const ENTITY: &'static str = "Question";

    async fn list(&self, filters: &QuestionFilters, page: PageRequest) -> AppResult<Paginated<Question>> {
        let body: ListBody<Question> = self
            .gateway
            .get("/onboarding/questions", &filters.to_params(page))
            .await?;
        Ok(body.into())
    }

    async fn create(&self, payload: &CreateQuestion) -> AppResult<Question> {
        self.gateway.post("/onboarding/questions", payload).await
    }

    async fn update(&self, id: &QuestionId, payload: &UpdateQuestion) -> AppResult<Question> {
        self.gateway
            .patch(&format!("/onboarding/questions/{id}"), payload)
            .await
    }

    async fn delete(&self, id: &QuestionId) -> AppResult<()> {
        self.gateway
            .delete(&format!("/onboarding/questions/{id}"))
            .await
    }
}

//! Authentication endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_core::types::QueryParams;
use qams_entity::session::{LoginCredentials, LoginResponse};
use qams_entity::user::User;

use crate::gateway::ApiGateway;
use crate::traits::AuthBackend;

/// `POST /users/login` and `GET /users/me`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    gateway: Arc<ApiGateway>,
}

impl AuthApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl AuthBackend for AuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<LoginResponse> {
        self.gateway.post("/users/login", credentials).await
    }

    async fn current_user(&self) -> AppResult<User> {
        self.gateway.get("/users/me", &QueryParams::new()).await
    }

    fn session_established(&self) {
        self.gateway.rearm_sign_out();
    }
}

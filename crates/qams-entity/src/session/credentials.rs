//! Login request and response payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::User;

/// Credentials submitted by the sign-in form.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    /// Account email.
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    /// Account password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl LoginCredentials {
    /// Create credentials, trimming the email.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful authentication response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer credential for subsequent requests.
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,
    /// Profile of the authenticated user.
    #[serde(default)]
    pub user: Option<User>,
}

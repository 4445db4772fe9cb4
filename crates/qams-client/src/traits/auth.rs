//! Authentication backend trait.

use async_trait::async_trait;

use qams_core::result::AppResult;
use qams_entity::session::{LoginCredentials, LoginResponse};
use qams_entity::user::User;

/// Backend calls used by the session lifecycle manager.
#[async_trait]
pub trait AuthBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange credentials for an access token and profile.
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<LoginResponse>;

    /// Fetch the profile of the user owning the stored credential.
    async fn current_user(&self) -> AppResult<User>;

    /// Called once a verified session is established, so the global
    /// sign-out side effect can fire again on a later expiry.
    fn session_established(&self) {}
}

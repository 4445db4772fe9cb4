//! Session lifecycle manager: login, logout, and cold-start verification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use qams_client::traits::AuthBackend;
use qams_core::config::SessionConfig;
use qams_core::error::AppError;
use qams_core::result::AppResult;
use qams_core::traits::{DurableStorage, SignInNavigator};
use qams_entity::session::LoginCredentials;
use qams_entity::user::User;
use qams_entity::validation;

use super::guard::LoadingGuard;
use super::state::Session;
use super::store::SessionStore;

/// Returned when valid credentials belong to a user without console access.
pub const ACCESS_DENIED: &str = "Access denied. Only Super Admins can access this portal.";
/// Returned when the backend accepted the login but sent no credential.
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
/// Fallback for login failures without a usable message.
pub const LOGIN_ERROR: &str = "An error occurred during login";

/// Owns the session state and is its only writer.
///
/// Lifecycle operations are serialized by an async mutex. `logout` does
/// not wait for it: it bumps an epoch counter instead, and an in-flight
/// login or verification whose epoch is stale never commits its result.
pub struct SessionManager {
    /// Authentication endpoints.
    backend: Arc<dyn AuthBackend>,
    /// Credential and snapshot persistence.
    store: SessionStore,
    /// Sign-in navigation side effect.
    navigator: Arc<dyn SignInNavigator>,
    /// Current session.
    state: RwLock<Session>,
    /// Serializes login and initialize.
    lifecycle: Mutex<()>,
    /// Incremented by every logout.
    epoch: AtomicU64,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &self.store)
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl SessionManager {
    /// Create a manager and restore the persisted snapshot as an
    /// unverified hint. Call [`initialize_auth`](Self::initialize_auth)
    /// before trusting it.
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn SignInNavigator>,
        config: &SessionConfig,
    ) -> Self {
        let store = SessionStore::new(storage, config);
        let restored = store
            .load_snapshot()
            .map(|s| Session::unverified(s.user, s.token))
            .unwrap_or_default();
        if restored.user().is_some() {
            debug!("Restored unverified session snapshot");
        }

        Self {
            backend,
            store,
            navigator,
            state: RwLock::new(restored),
            lifecycle: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// A copy of the current session.
    pub fn session(&self) -> Session {
        self.read().clone()
    }

    /// Whether the current session is a verified super-admin session.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Sign in with email and password.
    ///
    /// Valid credentials for a user without the super-admin flag are
    /// rejected with [`ACCESS_DENIED`] and nothing is persisted.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let credentials = LoginCredentials::new(email, password);
        validation::check(&credentials)?;

        let _lifecycle = self.lifecycle.lock().await;
        let epoch = self.epoch.load(Ordering::SeqCst);
        let _loading = LoadingGuard::begin(&self.state);

        let response = self.backend.login(&credentials).await.map_err(|e| {
            warn!(kind = %e.kind, "Login request failed");
            login_error(e)
        })?;

        let token = response.access_token.filter(|t| !t.trim().is_empty());
        let (Some(token), Some(user)) = (token, response.user) else {
            warn!("Login response carried no credential");
            return Err(AppError::authentication(LOGIN_FAILED));
        };

        if !user.is_super_admin {
            warn!(user_id = %user.id, "Login rejected: user is not a super admin");
            return Err(AppError::authorization(ACCESS_DENIED));
        }

        if !self.is_current(epoch) {
            return Err(AppError::authentication("Signed out while logging in"));
        }

        self.store.save_token(&token)?;
        self.commit(Session::verified(user.clone(), token));
        self.backend.session_established();
        info!(user_id = %user.id, "Super admin signed in");
        Ok(user)
    }

    /// Sign out: wipe durable storage and the in-memory session, then
    /// navigate to sign-in. Safe to call when already signed out.
    pub fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.clear_everything();
        info!("Signed out");
        self.navigator.redirect_to_sign_in();
    }

    /// Resolve the session on start-up.
    ///
    /// Without a stored credential the session is anonymous. Otherwise the
    /// profile is re-fetched; any failure, or a user who lost the
    /// super-admin flag, clears everything. Never fails.
    pub async fn initialize_auth(&self) -> Session {
        let _lifecycle = self.lifecycle.lock().await;
        let epoch = self.epoch.load(Ordering::SeqCst);

        let token = match self.store.token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read stored credential");
                self.clear_everything();
                return self.session();
            }
        };

        let Some(token) = token else {
            debug!("No stored credential; session is anonymous");
            self.write().clear();
            return self.session();
        };

        {
            let _loading = LoadingGuard::begin(&self.state);
            let had_cached_user = self.read().user().is_some();
            debug!(had_cached_user, "Verifying stored session");

            match self.backend.current_user().await {
                Ok(user) if user.is_super_admin => {
                    if self.is_current(epoch) {
                        let user_id = user.id.clone();
                        self.commit(Session::verified(user, token));
                        self.backend.session_established();
                        info!(user_id = %user_id, "Stored session verified");
                    }
                }
                Ok(user) => {
                    warn!(user_id = %user.id, "Stored session belongs to a non super admin; clearing");
                    self.clear_everything();
                }
                Err(e) => {
                    warn!(kind = %e.kind, "Stored session could not be verified; clearing");
                    self.clear_everything();
                }
            }
        }

        self.session()
    }

    fn is_current(&self, epoch: u64) -> bool {
        let current = self.epoch.load(Ordering::SeqCst) == epoch;
        if !current {
            debug!("Discarding lifecycle result superseded by logout");
        }
        current
    }

    fn commit(&self, session: Session) {
        if let Err(e) = self.store.save_snapshot(&session) {
            error!(error = %e, "Failed to persist session snapshot");
        }
        self.write().replace_identity(session);
    }

    fn clear_everything(&self) {
        if let Err(e) = self.store.clear() {
            error!(error = %e, "Failed to clear durable storage");
        }
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }
}

/// Keep the kind of a failed login but make sure it carries a message
/// the sign-in form can show.
fn login_error(err: AppError) -> AppError {
    AppError {
        message: err.user_message_or(LOGIN_ERROR),
        ..err
    }
}

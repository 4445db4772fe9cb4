//! Persistence of the bearer credential and the session snapshot.

use std::sync::Arc;

use tracing::{debug, warn};

use qams_core::config::SessionConfig;
use qams_core::result::AppResult;
use qams_core::traits::DurableStorage;
use qams_core::traits::storage::{read_json, write_json};
use qams_entity::session::PersistedSession;

use super::state::Session;

/// Reads and writes session data in durable storage under the configured
/// keys.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn DurableStorage>,
    token_key: String,
    snapshot_key: String,
}

impl SessionStore {
    /// Create a store over `storage` using the keys from `config`.
    pub fn new(storage: Arc<dyn DurableStorage>, config: &SessionConfig) -> Self {
        Self {
            storage,
            token_key: config.token_key.clone(),
            snapshot_key: config.snapshot_key.clone(),
        }
    }

    /// The stored bearer credential, ignoring blank values.
    pub fn token(&self) -> AppResult<Option<String>> {
        Ok(self
            .storage
            .get(&self.token_key)?
            .filter(|t| !t.trim().is_empty()))
    }

    /// Store the bearer credential.
    pub fn save_token(&self, token: &str) -> AppResult<()> {
        self.storage.set(&self.token_key, token)
    }

    /// Load the persisted snapshot. Unreadable or incompatible snapshots
    /// are discarded.
    pub fn load_snapshot(&self) -> Option<PersistedSession> {
        match read_json::<PersistedSession>(self.storage.as_ref(), &self.snapshot_key) {
            Ok(Some(snapshot)) if snapshot.is_compatible() => Some(snapshot),
            Ok(Some(snapshot)) => {
                debug!(version = snapshot.version, "Ignoring incompatible session snapshot");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session snapshot");
                None
            }
        }
    }

    /// Persist `session` as the snapshot blob.
    pub fn save_snapshot(&self, session: &Session) -> AppResult<()> {
        let snapshot = PersistedSession {
            version: qams_entity::session::snapshot::SNAPSHOT_VERSION,
            user: session.user().cloned(),
            token: session.token().map(str::to_string),
            is_authenticated: session.is_authenticated(),
        };
        write_json(self.storage.as_ref(), &self.snapshot_key, &snapshot)
    }

    /// Wipe all durable storage.
    pub fn clear(&self) -> AppResult<()> {
        self.storage.clear()
    }
}

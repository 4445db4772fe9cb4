//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where and under which keys the authenticated session is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the durable storage file.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Storage key holding the bearer credential.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Storage key holding the persisted session snapshot.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
    /// Sign-in entry point the console navigates to after sign-out.
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            token_key: default_token_key(),
            snapshot_key: default_snapshot_key(),
            sign_in_path: default_sign_in_path(),
        }
    }
}

fn default_storage_path() -> String {
    "data/admin-session.json".to_string()
}

fn default_token_key() -> String {
    "admin-auth-token".to_string()
}

fn default_snapshot_key() -> String {
    "admin-auth-storage".to_string()
}

fn default_sign_in_path() -> String {
    "/login".to_string()
}

//! Persisted session snapshot used for fast restore across restarts.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The blob written to durable storage after every session change.
///
/// The `is_authenticated` flag is a hint only: a restored snapshot is
/// always re-verified against the backend before it grants access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    /// Snapshot format version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Cached profile.
    #[serde(default)]
    pub user: Option<User>,
    /// Cached bearer credential.
    #[serde(default)]
    pub token: Option<String>,
    /// Whether the session was authenticated when written.
    #[serde(default)]
    pub is_authenticated: bool,
}

impl PersistedSession {
    /// Whether this snapshot was written by a compatible version.
    pub fn is_compatible(&self) -> bool {
        self.version == SNAPSHOT_VERSION
    }
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

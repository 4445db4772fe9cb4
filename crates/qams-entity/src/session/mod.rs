//! Authentication payloads and the persisted session snapshot.

pub mod credentials;
pub mod snapshot;

pub use credentials::{LoginCredentials, LoginResponse};
pub use snapshot::PersistedSession;

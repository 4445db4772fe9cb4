//! Session state, persistence, and lifecycle management.

pub mod guard;
pub mod manager;
pub mod state;
pub mod store;

pub use manager::SessionManager;
pub use state::{Session, SessionPhase};
pub use store::SessionStore;

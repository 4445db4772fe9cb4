//! # qams-auth
//!
//! Session lifecycle for the QAMS admin console: sign-in with the
//! super-admin gate, sign-out, and cold-start re-verification of a
//! persisted session.
//!
//! ## Modules
//!
//! - `session`: session state, persistence, and the lifecycle manager

pub mod session;

pub use session::{Session, SessionManager, SessionPhase, SessionStore};

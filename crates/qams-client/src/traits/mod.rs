//! Seams between the resource modules and the layers above them.
//!
//! The session manager and the console views depend on these traits
//! rather than on the HTTP gateway, so they can be driven by in-memory
//! fakes in tests.

pub mod activity;
pub mod auth;
pub mod resource;

pub use activity::{ActivityLogSource, UserDirectory};
pub use auth::AuthBackend;
pub use resource::Resource;

//! Core type definitions used across the QAMS workspace.

pub mod envelope;
pub mod id;
pub mod pagination;
pub mod query;

pub use envelope::{Envelope, unwrap_payload};
pub use id::*;
pub use pagination::{PageRequest, Paginated};
pub use query::QueryParams;

//! # qams-client
//!
//! Talks to the QAMS backend REST API. The [`ApiGateway`] attaches the
//! bearer credential to every call, unwraps response envelopes and tears
//! the session down on unauthorized responses. One resource module per
//! entity builds query parameters and normalizes list shapes. Durable
//! storage backends persist the credential between runs.

pub mod gateway;
pub mod resources;
pub mod storage;
pub mod traits;

pub use gateway::ApiGateway;
pub use storage::{FileStorage, MemoryStorage};

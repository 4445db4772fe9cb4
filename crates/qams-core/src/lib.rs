//! # qams-core
//!
//! Core crate for the QAMS admin console. Contains the unified error
//! system, configuration schemas, typed identifiers, pagination and
//! response-envelope types, query-parameter building, and the traits
//! the other crates implement (durable storage, sign-in navigation).
//!
//! This crate has **no** internal dependencies on other QAMS crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

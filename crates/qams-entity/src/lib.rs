//! # qams-entity
//!
//! Domain entity models for the QAMS admin console. Every struct in this
//! crate mirrors a document served by the backend REST API or a payload
//! sent to it. All entities derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`; create/update payloads additionally derive
//! `validator::Validate` so forms can be checked before submission.

pub mod accreditation;
pub mod activity;
pub mod client;
pub mod de;
pub mod department;
pub mod question;
pub mod reference;
pub mod role;
pub mod session;
pub mod template;
pub mod user;
pub mod validation;

pub use reference::Ref;

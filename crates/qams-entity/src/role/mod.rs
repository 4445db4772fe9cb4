//! Role and permission entities.

pub mod model;
pub mod permission;

pub use model::{CreateRole, Role, UpdateRole};
pub use permission::PERMISSIONS;

//! User domain entities.

pub mod model;
pub mod status;

pub use model::{CreateUser, UpdatePassword, UpdateUser, User, UserSummary};
pub use status::UserStatus;

//! Core traits defined in `qams-core` and implemented by other crates.

pub mod navigator;
pub mod storage;

pub use navigator::SignInNavigator;
pub use storage::DurableStorage;

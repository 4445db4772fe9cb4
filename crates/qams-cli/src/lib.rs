//! # qams-cli
//!
//! Operator command tree for the QAMS admin console. Every command drives
//! the same session manager, list views, form modals, and activity-log
//! engine a graphical front end would, and prints the result as a table
//! or as JSON.

pub mod commands;
pub mod context;
pub mod output;
pub mod prompt;

pub use commands::Cli;
pub use context::Console;

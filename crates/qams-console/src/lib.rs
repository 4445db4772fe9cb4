//! # qams-console
//!
//! View state for the QAMS admin console, kept free of any rendering so
//! it can be driven from the CLI or from tests.
//!
//! ## Modules
//!
//! - `activity`: activity-log query engine and actor autocomplete
//! - `list`: generic list-and-filter view over any resource
//! - `forms`: create/edit modals and the delete confirmation flow
//! - `dashboard`: headline statistics
//! - `debounce`, `sequence`: quiet-period scheduling and latest-only
//!   response application shared by every query surface

pub mod activity;
pub mod dashboard;
pub mod debounce;
pub mod forms;
pub mod list;
pub mod sequence;

pub use activity::{ActivityLogEngine, ActivityLogFilters, ActorAutocomplete, SuggestionState};
pub use dashboard::DashboardStats;
pub use debounce::Debouncer;
pub use forms::{
    AssumeYes, Confirmation, DeleteOutcome, FormModal, FormMode, Notice, SubmitOutcome,
    delete_with_confirmation,
};
pub use list::ListView;
pub use sequence::RequestSequence;

//! Activity log (audit trail) viewer state.

pub mod actor;
pub mod engine;
pub mod filters;

pub use actor::{ActorAutocomplete, ActorState, SuggestionState};
pub use engine::{ActivityLogEngine, ActivityLogState};
pub use filters::{ActivityLogFilters, DateRange};

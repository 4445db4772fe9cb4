//! Activity log (audit trail) entities.

pub mod entity_tag;
pub mod model;
pub mod page;

pub use entity_tag::EntityTag;
pub use model::{ActivityLogEntry, Actor, Operation};
pub use page::ActivityLogPage;

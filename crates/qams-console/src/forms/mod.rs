//! Create/edit form modals and the delete confirmation flow.

pub mod confirm;
pub mod modal;
pub mod notice;

pub use confirm::{AssumeYes, Confirmation, DeleteOutcome, delete_with_confirmation};
pub use modal::{FormModal, FormMode, SubmitOutcome};
pub use notice::Notice;

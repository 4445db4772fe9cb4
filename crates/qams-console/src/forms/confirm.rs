//! Delete confirmation flow.

use tracing::{info, warn};

use qams_client::traits::Resource;

use super::notice::Notice;
use crate::list::ListView;

/// Asks the operator to confirm a destructive action.
pub trait Confirmation: Send + Sync {
    /// Return `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything (non-interactive `--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Result of a delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined; no request was issued.
    Cancelled,
    /// Deleted and the list refreshed.
    Deleted(Notice),
    /// The backend rejected the delete.
    Failed(Notice),
}

/// Confirm, delete `id`, and refresh `list` on success.
pub async fn delete_with_confirmation<R: Resource>(
    resource: &R,
    id: &R::Id,
    confirmation: &dyn Confirmation,
    list: Option<&ListView<R>>,
) -> DeleteOutcome {
    let entity = R::ENTITY.to_lowercase();
    if !confirmation.confirm(&format!("Are you sure you want to delete this {entity}?")) {
        return DeleteOutcome::Cancelled;
    }

    match resource.delete(id).await {
        Ok(()) => {
            info!(entity = R::ENTITY, %id, "Deleted");
            if let Some(list) = list {
                list.refresh().await;
            }
            DeleteOutcome::Deleted(Notice::done(R::ENTITY, "deleted"))
        }
        Err(e) => {
            warn!(entity = R::ENTITY, %id, error = %e, "Delete failed");
            let fallback = format!("Failed to delete {entity}");
            DeleteOutcome::Failed(Notice::Error(e.user_message_or(&fallback)))
        }
    }
}

//! Create/edit modal state for one resource.

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use qams_client::traits::Resource;
use qams_entity::validation::{FieldErrors, field_messages};

use super::notice::{Notice, OPERATION_FAILED};
use crate::list::ListView;

/// Which payload the modal collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    /// A new item.
    Create,
    /// Changes to an existing item.
    Edit(Id),
}

/// Result of a submit attempt.
#[derive(Debug, Clone)]
pub enum SubmitOutcome<T> {
    /// Local validation failed; nothing was sent. The modal stays open.
    Invalid(FieldErrors),
    /// The backend rejected the request. The modal stays open.
    Failed(Notice),
    /// Saved. The modal is closed and the list refreshed.
    Saved(T, Notice),
}

impl<T> SubmitOutcome<T> {
    /// The notice to show, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Invalid(_) => None,
            Self::Failed(n) | Self::Saved(_, n) => Some(n),
        }
    }
}

/// A create/edit modal bound to a resource and, optionally, the list it
/// refreshes after a save.
pub struct FormModal<R: Resource> {
    resource: Arc<R>,
    list: Option<ListView<R>>,
    mode: Option<FormMode<R::Id>>,
    field_errors: FieldErrors,
}

impl<R: Resource> std::fmt::Debug for FormModal<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormModal")
            .field("entity", &R::ENTITY)
            .field("open", &self.mode.is_some())
            .field("field_errors", &self.field_errors)
            .finish()
    }
}

impl<R: Resource> FormModal<R> {
    /// A closed modal over `resource`.
    pub fn new(resource: Arc<R>) -> Self {
        Self {
            resource,
            list: None,
            mode: None,
            field_errors: FieldErrors::new(),
        }
    }

    /// A closed modal that refreshes `list` after every save.
    pub fn for_list(list: &ListView<R>) -> Self {
        Self {
            list: Some(list.clone()),
            ..Self::new(list.resource().clone())
        }
    }

    /// Open in create mode with no field errors.
    pub fn open_create(&mut self) {
        self.mode = Some(FormMode::Create);
        self.field_errors.clear();
    }

    /// Open in edit mode for `id`.
    pub fn open_edit(&mut self, id: R::Id) {
        self.mode = Some(FormMode::Edit(id));
        self.field_errors.clear();
    }

    /// Close and drop any field errors.
    pub fn close(&mut self) {
        self.mode = None;
        self.field_errors.clear();
    }

    /// Whether the modal is showing.
    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    /// Current mode, `None` while closed.
    pub fn mode(&self) -> Option<&FormMode<R::Id>> {
        self.mode.as_ref()
    }

    /// Inline errors of the last rejected draft.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Validate and create.
    pub async fn submit_create(&mut self, draft: &R::Create) -> SubmitOutcome<R::Item>
    where
        R::Create: Validate,
    {
        if let Err(errors) = draft.validate() {
            return self.reject(field_messages(&errors));
        }
        self.field_errors.clear();
        let outcome = self.resource.create(draft).await;
        self.finish(outcome, "created").await
    }

    /// Validate and update the item being edited.
    pub async fn submit_update(&mut self, draft: &R::Update) -> SubmitOutcome<R::Item>
    where
        R::Update: Validate,
    {
        let Some(FormMode::Edit(id)) = self.mode.clone() else {
            warn!(entity = R::ENTITY, "Update submitted without an item to edit");
            return SubmitOutcome::Failed(Notice::Error(OPERATION_FAILED.to_string()));
        };
        if let Err(errors) = draft.validate() {
            return self.reject(field_messages(&errors));
        }
        self.field_errors.clear();
        let outcome = self.resource.update(&id, draft).await;
        self.finish(outcome, "updated").await
    }

    fn reject(&mut self, errors: FieldErrors) -> SubmitOutcome<R::Item> {
        debug!(entity = R::ENTITY, fields = errors.len(), "Draft rejected by validation");
        self.field_errors = errors.clone();
        SubmitOutcome::Invalid(errors)
    }

    async fn finish(
        &mut self,
        outcome: qams_core::result::AppResult<R::Item>,
        verb: &str,
    ) -> SubmitOutcome<R::Item> {
        match outcome {
            Ok(item) => {
                info!(entity = R::ENTITY, verb, "Saved");
                self.close();
                if let Some(list) = &self.list {
                    list.refresh().await;
                }
                SubmitOutcome::Saved(item, Notice::done(R::ENTITY, verb))
            }
            Err(e) => {
                warn!(entity = R::ENTITY, error = %e, "Save failed");
                SubmitOutcome::Failed(Notice::Error(e.user_message_or(OPERATION_FAILED)))
            }
        }
    }
}

//! Shared list/create/update/delete plumbing for the entity commands.

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tabled::Tabled;
use validator::Validate;

use qams_client::traits::Resource;
use qams_core::error::{AppError, ErrorKind};
use qams_core::result::AppResult;
use qams_console::{DeleteOutcome, FormModal, ListView, Notice, SubmitOutcome, delete_with_confirmation};

use crate::context::Console;
use crate::output::{self, OutputFormat};

/// JSON payload for create and update commands
#[derive(Debug, Clone, Args)]
pub struct PayloadArgs {
    /// Inline JSON payload
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub data: Option<String>,
    /// Path to a JSON payload file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    /// Read and deserialize the payload.
    pub fn read<T: DeserializeOwned>(&self) -> AppResult<T> {
        let raw = match (&self.data, &self.file) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Failed to read {}: {}", path.display(), e),
                    e,
                )
            })?,
            (None, None) => return Err(AppError::validation("Provide --data or --file")),
        };
        serde_json::from_str(&raw).map_err(|e| {
            AppError::with_source(ErrorKind::Validation, format!("Invalid payload: {e}"), e)
        })
    }
}

/// Page listing with its counters, as printed in JSON mode.
#[derive(Debug, Serialize)]
struct PageOutput<'a, T> {
    items: &'a [T],
    total: u64,
    page: u64,
    total_pages: u64,
}

/// Fetch one page through a list view and print it.
pub async fn list<R, Row>(
    console: &Console,
    resource: Arc<R>,
    filters: R::Filters,
    page: u64,
    to_row: fn(&R::Item) -> Row,
) -> AppResult<()>
where
    R: Resource,
    R::Item: Serialize,
    Row: Tabled + Serialize,
{
    let view = ListView::new(resource, console.console_config());
    view.set_filters(filters);
    view.go_to_page(page).await;

    let state = view.state();
    if let Some(error) = state.error {
        return Err(AppError::new(ErrorKind::Backend, error));
    }

    match console.format() {
        OutputFormat::Table => {
            let rows: Vec<Row> = state.items.iter().map(to_row).collect();
            output::print_list(&rows, OutputFormat::Table);
            output::print_page_footer(state.page, state.total_pages, state.total);
        }
        OutputFormat::Json => output::print_json(&PageOutput {
            items: &state.items,
            total: state.total,
            page: state.page,
            total_pages: state.total_pages,
        }),
    }
    Ok(())
}

/// Validate and create through a form modal.
pub async fn create<R>(console: &Console, resource: Arc<R>, draft: R::Create) -> AppResult<()>
where
    R: Resource,
    R::Create: Validate,
    R::Item: Serialize,
{
    let mut modal = FormModal::new(resource);
    modal.open_create();
    let outcome = modal.submit_create(&draft).await;
    report(console, outcome)
}

/// Validate and update `id` through a form modal.
pub async fn update<R>(console: &Console, resource: Arc<R>, id: R::Id, draft: R::Update) -> AppResult<()>
where
    R: Resource,
    R::Update: Validate,
    R::Item: Serialize,
{
    let mut modal = FormModal::new(resource);
    modal.open_edit(id);
    let outcome = modal.submit_update(&draft).await;
    report(console, outcome)
}

/// Delete `id` after the operator confirms.
pub async fn delete<R: Resource>(console: &Console, resource: Arc<R>, id: R::Id) -> AppResult<()> {
    match delete_with_confirmation(resource.as_ref(), &id, console.confirmation(), None).await {
        DeleteOutcome::Cancelled => {
            output::print_warning("Cancelled");
            Ok(())
        }
        DeleteOutcome::Deleted(notice) => {
            output::print_notice(&notice);
            Ok(())
        }
        DeleteOutcome::Failed(notice) => Err(failure(&notice)),
    }
}

fn report<T: Serialize + Debug>(console: &Console, outcome: SubmitOutcome<T>) -> AppResult<()> {
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            for (field, messages) in &errors {
                for message in messages {
                    output::print_kv(field, message);
                }
            }
            let first = errors.values().flatten().next().cloned();
            Err(AppError::validation(
                first.unwrap_or_else(|| "Validation failed".to_string()),
            ))
        }
        SubmitOutcome::Failed(notice) => Err(failure(&notice)),
        SubmitOutcome::Saved(item, notice) => {
            output::print_notice(&notice);
            output::print_item(&item, console.format());
            Ok(())
        }
    }
}

fn failure(notice: &Notice) -> AppError {
    AppError::new(ErrorKind::Backend, notice.message())
}

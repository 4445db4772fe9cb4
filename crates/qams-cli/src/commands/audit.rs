//! Activity log (audit trail) commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_core::error::{AppError, ErrorKind};
use qams_core::result::AppResult;
use qams_core::types::UserId;
use qams_console::{ActivityLogEngine, ActivityLogFilters, ActorAutocomplete, SuggestionState};
use qams_entity::activity::{ActivityLogEntry, EntityTag, Operation};

use crate::context::Console;
use crate::output::{self, OutputFormat};

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Search the activity log
    Search {
        /// Filter by actor (user ID; see `audit actors`)
        #[arg(long)]
        actor: Option<UserId>,
        /// Filter by entity instance ID
        #[arg(long)]
        entity_id: Option<String>,
        /// Filter by entity name
        #[arg(long)]
        entity_name: Option<String>,
        /// Filter by entity type (e.g. user, client, onboarding_template)
        #[arg(long)]
        entity: Option<String>,
        /// Filter by operation (insert, update, delete)
        #[arg(long)]
        operation: Option<Operation>,
        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Find actors by name or email
    Actors {
        /// Partial name or email
        text: String,
    },
    /// List the known entity types
    Entities,
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    time: String,
    operation: String,
    entity: String,
    name: String,
    actor: String,
    changed: String,
}

fn row(e: &ActivityLogEntry) -> AuditRow {
    AuditRow {
        time: e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        operation: e.operation.label().to_string(),
        entity: e.entity.label(),
        name: output::truncate(&e.entity_name, 32),
        actor: e.actor_name(),
        changed: output::truncate(&e.changed_fields().join(", "), 40),
    }
}

/// Actor suggestion row
#[derive(Debug, Serialize, Tabled)]
struct ActorRow {
    id: String,
    name: String,
    email: String,
}

/// Entity type row
#[derive(Debug, Serialize, Tabled)]
struct EntityRow {
    tag: String,
    label: String,
}

/// Execute audit commands
pub async fn execute(args: &AuditArgs, console: &Console) -> AppResult<()> {
    match &args.command {
        AuditCommand::Search {
            actor,
            entity_id,
            entity_name,
            entity,
            operation,
            from,
            to,
            page,
        } => {
            let filters = ActivityLogFilters {
                actor_id: actor.clone(),
                entity_id: entity_id.clone(),
                entity_name: entity_name.clone(),
                entity_type: entity.as_deref().map(EntityTag::from),
                operation: *operation,
                from_date: *from,
                to_date: *to,
            };
            search(console, filters, *page).await
        }
        AuditCommand::Actors { text } => actors(console, text).await,
        AuditCommand::Entities => {
            let rows: Vec<EntityRow> = EntityTag::known()
                .map(|t| EntityRow {
                    label: t.label(),
                    tag: t.as_str().to_string(),
                })
                .collect();
            output::print_list(&rows, console.format());
            Ok(())
        }
    }
}

async fn search(console: &Console, filters: ActivityLogFilters, page: u64) -> AppResult<()> {
    if let (Some(from), Some(to)) = (filters.from_date, filters.to_date) {
        if from > to {
            return Err(AppError::validation("--from must not be after --to"));
        }
    }

    let engine = ActivityLogEngine::new(console.activity_logs(), console.console_config());
    engine.set_filters(filters);
    engine.go_to_page(page).await;

    let state = engine.state();
    if let Some(error) = state.error {
        return Err(AppError::new(ErrorKind::Backend, error));
    }
    let Some(result) = state.result else {
        return Ok(());
    };

    match console.format() {
        OutputFormat::Table => {
            let rows: Vec<AuditRow> = result.items.iter().map(row).collect();
            output::print_list(&rows, OutputFormat::Table);
            output::print_page_footer(result.page, result.total_pages, result.total);
        }
        OutputFormat::Json => output::print_json(&result),
    }
    Ok(())
}

async fn actors(console: &Console, text: &str) -> AppResult<()> {
    let config = console.console_config();
    let autocomplete = ActorAutocomplete::new(console.users(), config);
    autocomplete.input(text);
    autocomplete.settle().await;

    match autocomplete.state().suggestions {
        SuggestionState::Results(users) => {
            let rows: Vec<ActorRow> = users
                .iter()
                .map(|u| ActorRow {
                    id: u.id.to_string(),
                    name: u.display_name(),
                    email: u.email.clone(),
                })
                .collect();
            output::print_list(&rows, console.format());
            Ok(())
        }
        SuggestionState::Empty => {
            output::print_warning("No users found");
            Ok(())
        }
        SuggestionState::Failed(message) => Err(AppError::new(ErrorKind::Backend, message)),
        SuggestionState::Idle | SuggestionState::Loading => {
            output::print_warning(&format!(
                "Type at least {} characters to search",
                config.actor_min_chars
            ));
            Ok(())
        }
    }
}

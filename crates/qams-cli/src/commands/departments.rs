//! Department commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_client::resources::DepartmentFilters;
use qams_core::result::AppResult;
use qams_core::types::{ClientId, DepartmentId};
use qams_entity::department::Department;

use super::crud::{self, PayloadArgs};
use crate::context::Console;
use crate::output;

/// Arguments for department commands
#[derive(Debug, Args)]
pub struct DepartmentArgs {
    /// Department subcommand
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

/// Department subcommands
#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// List departments
    List {
        /// Filter by client
        #[arg(long)]
        client: Option<ClientId>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Create a department from a JSON payload
    Create(PayloadArgs),
    /// Update a department from a JSON payload
    Update {
        /// Department ID
        id: DepartmentId,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a department
    Delete {
        /// Department ID
        id: DepartmentId,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct DepartmentRow {
    id: String,
    name: String,
    description: String,
    client: String,
    created_at: String,
}

fn row(d: &Department) -> DepartmentRow {
    DepartmentRow {
        id: d.id.to_string(),
        name: d.name.clone(),
        description: output::truncate(d.description.as_deref().unwrap_or("-"), 40),
        client: d.client.clone().unwrap_or_else(|| "-".to_string()),
        created_at: output::fmt_time(d.created_at),
    }
}

/// Execute department commands
pub async fn execute(args: &DepartmentArgs, console: &Console) -> AppResult<()> {
    let departments = console.departments();
    match &args.command {
        DepartmentCommand::List { client, page } => {
            let filters = DepartmentFilters {
                client_id: client.clone(),
            };
            crud::list(console, departments, filters, *page, row).await
        }
        DepartmentCommand::Create(payload) => {
            crud::create(console, departments, payload.read()?).await
        }
        DepartmentCommand::Update { id, payload } => {
            crud::update(console, departments, id.clone(), payload.read()?).await
        }
        DepartmentCommand::Delete { id } => crud::delete(console, departments, id.clone()).await,
    }
}

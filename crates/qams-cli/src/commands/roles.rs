//! Role and permission commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_client::resources::RoleFilters;
use qams_core::result::AppResult;
use qams_core::types::{ClientId, RoleId};
use qams_entity::role::Role;

use super::crud::{self, PayloadArgs};
use crate::context::Console;

/// Arguments for role commands
#[derive(Debug, Args)]
pub struct RoleArgs {
    /// Role subcommand
    #[command(subcommand)]
    pub command: RoleCommand,
}

/// Role subcommands
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// List roles
    List {
        /// Filter by client
        #[arg(long)]
        client: Option<ClientId>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Create a role from a JSON payload
    Create(PayloadArgs),
    /// Update a role from a JSON payload
    Update {
        /// Role ID
        id: RoleId,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a role
    Delete {
        /// Role ID
        id: RoleId,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    id: String,
    name: String,
    permissions: String,
    client: String,
}

fn row(r: &Role) -> RoleRow {
    RoleRow {
        id: r.id.to_string(),
        name: r.name.clone(),
        permissions: r.permissions.join(", "),
        client: r.client.clone().unwrap_or_else(|| "-".to_string()),
    }
}

/// Execute role commands
pub async fn execute(args: &RoleArgs, console: &Console) -> AppResult<()> {
    let roles = console.roles();
    match &args.command {
        RoleCommand::List { client, page } => {
            let filters = RoleFilters {
                client_id: client.clone(),
            };
            crud::list(console, roles, filters, *page, row).await
        }
        RoleCommand::Create(payload) => crud::create(console, roles, payload.read()?).await,
        RoleCommand::Update { id, payload } => {
            crud::update(console, roles, id.clone(), payload.read()?).await
        }
        RoleCommand::Delete { id } => crud::delete(console, roles, id.clone()).await,
    }
}

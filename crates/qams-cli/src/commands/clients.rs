//! Client (tenant organization) commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_client::resources::ClientFilters;
use qams_core::result::AppResult;
use qams_core::types::{ClientId, UserId};
use qams_entity::client::Client;

use super::crud::{self, PayloadArgs};
use crate::context::Console;
use crate::output;

/// Arguments for client commands
#[derive(Debug, Args)]
pub struct ClientArgs {
    /// Client subcommand
    #[command(subcommand)]
    pub command: ClientCommand,
}

/// Client subcommands
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// List clients
    List {
        /// Filter by name
        #[arg(short, long)]
        search: Option<String>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Create a client from a JSON payload
    Create(PayloadArgs),
    /// Update a client from a JSON payload
    Update {
        /// Client ID
        id: ClientId,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a client
    Delete {
        /// Client ID
        id: ClientId,
    },
    /// Add a user to a client
    AddUser {
        /// Client ID
        client: ClientId,
        /// User ID
        user: UserId,
    },
    /// Remove a user from a client
    RemoveUser {
        /// Client ID
        client: ClientId,
        /// User ID
        user: UserId,
    },
}

/// Client display row
#[derive(Debug, Serialize, Tabled)]
struct ClientRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    client_type: String,
    classification: String,
    address: String,
    created_at: String,
}

fn row(c: &Client) -> ClientRow {
    ClientRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        client_type: c.client_type.to_string(),
        classification: c.classification.clone(),
        address: output::truncate(&c.address, 40),
        created_at: output::fmt_time(c.created_at),
    }
}

/// Execute client commands
pub async fn execute(args: &ClientArgs, console: &Console) -> AppResult<()> {
    let clients = console.clients();
    match &args.command {
        ClientCommand::List { search, page } => {
            let filters = ClientFilters {
                search: search.clone(),
            };
            crud::list(console, clients, filters, *page, row).await
        }
        ClientCommand::Create(payload) => crud::create(console, clients, payload.read()?).await,
        ClientCommand::Update { id, payload } => {
            crud::update(console, clients, id.clone(), payload.read()?).await
        }
        ClientCommand::Delete { id } => crud::delete(console, clients, id.clone()).await,
        ClientCommand::AddUser { client, user } => {
            let updated = clients.add_user(client, user).await?;
            output::print_success(&format!("User {} added to {}", user, updated.name));
            Ok(())
        }
        ClientCommand::RemoveUser { client, user } => {
            clients.remove_user(client, user).await?;
            output::print_success(&format!("User {} removed from client {}", user, client));
            Ok(())
        }
    }
}

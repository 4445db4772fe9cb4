//! Accreditation lookup commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_core::result::AppResult;
use qams_core::types::{AccreditationId, ClientId};
use qams_entity::accreditation::Accreditation;

use crate::context::Console;
use crate::output;

/// Arguments for accreditation commands
#[derive(Debug, Args)]
pub struct AccreditationArgs {
    /// Accreditation subcommand
    #[command(subcommand)]
    pub command: AccreditationCommand,
}

/// Accreditation subcommands
#[derive(Debug, Subcommand)]
pub enum AccreditationCommand {
    /// List accreditations
    List {
        /// Only those of a client
        #[arg(long)]
        client: Option<ClientId>,
    },
    /// Show one accreditation
    Show {
        /// Accreditation ID
        id: AccreditationId,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct AccreditationRow {
    id: String,
    name: String,
    code: String,
    authority: String,
    status: String,
}

/// Execute accreditation commands
pub async fn execute(args: &AccreditationArgs, console: &Console) -> AppResult<()> {
    let accreditations = console.accreditations();
    match &args.command {
        AccreditationCommand::List { client } => {
            let items = accreditations.list(client.as_ref()).await?;
            let rows: Vec<AccreditationRow> = items.iter().map(row).collect();
            output::print_list(&rows, console.format());
        }
        AccreditationCommand::Show { id } => {
            let item = accreditations.get(id).await?;
            output::print_item(&item, console.format());
        }
    }
    Ok(())
}

fn row(a: &Accreditation) -> AccreditationRow {
    AccreditationRow {
        id: a.id.to_string(),
        name: a.option_label().unwrap_or("-").to_string(),
        code: a.code.clone(),
        authority: a.authority.clone(),
        status: a.status.clone(),
    }
}

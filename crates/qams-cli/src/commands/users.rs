//! User management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_client::resources::UserFilters;
use qams_core::result::AppResult;
use qams_core::types::{ClientId, UserId};
use qams_entity::user::{UpdatePassword, User, UserStatus};
use qams_entity::validation;

use super::crud::{self, PayloadArgs};
use crate::context::Console;
use crate::output;
use crate::prompt;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users
    List {
        /// Search by name or email
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by status (active, invited, inactive, suspended)
        #[arg(long)]
        status: Option<UserStatus>,
        /// Filter by client
        #[arg(long)]
        client: Option<ClientId>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Show one user
    Show {
        /// User ID
        id: UserId,
    },
    /// Create a user from a JSON payload
    Create(PayloadArgs),
    /// Update a user from a JSON payload
    Update {
        /// User ID
        id: UserId,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: UserId,
    },
    /// Change a user's password (will prompt for values not provided)
    Password {
        /// User ID
        id: UserId,
        /// Current password
        #[arg(long)]
        current: Option<String>,
        /// New password
        #[arg(long)]
        new: Option<String>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    department: String,
    status: String,
    super_admin: bool,
}

fn row(u: &User) -> UserRow {
    UserRow {
        id: u.id.to_string(),
        name: u.display_name(),
        email: u.email.clone(),
        role: u.role_name().unwrap_or("-").to_string(),
        department: u.department_name().unwrap_or("-").to_string(),
        status: u.status.to_string(),
        super_admin: u.is_super_admin,
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, console: &Console) -> AppResult<()> {
    let users = console.users();
    match &args.command {
        UserCommand::List {
            search,
            status,
            client,
            page,
        } => {
            let filters = UserFilters {
                search: search.clone(),
                status: *status,
                client_id: client.clone(),
            };
            crud::list(console, users, filters, *page, row).await
        }
        UserCommand::Show { id } => {
            let user = users.get(id).await?;
            output::print_item(&user, console.format());
            Ok(())
        }
        UserCommand::Create(payload) => crud::create(console, users, payload.read()?).await,
        UserCommand::Update { id, payload } => {
            crud::update(console, users, id.clone(), payload.read()?).await
        }
        UserCommand::Delete { id } => crud::delete(console, users, id.clone()).await,
        UserCommand::Password { id, current, new } => {
            let payload = UpdatePassword {
                current_password: match current {
                    Some(p) => p.clone(),
                    None => prompt::password("Current password")?,
                },
                new_password: match new {
                    Some(p) => p.clone(),
                    None => prompt::password("New password")?,
                },
            };
            validation::check(&payload)?;
            users.update_password(id, &payload).await?;
            output::print_success("Password updated successfully");
            Ok(())
        }
    }
}

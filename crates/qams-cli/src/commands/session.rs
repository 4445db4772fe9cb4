//! Sign-in, sign-out, and identity commands.

use clap::Args;
use serde::Serialize;
use tracing::info;

use qams_core::result::AppResult;
use qams_entity::user::User;

use crate::context::Console;
use crate::output::{self, OutputFormat};
use crate::prompt;

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address (will prompt if not provided)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Identity summary printed by `whoami` and after login
#[derive(Debug, Serialize)]
struct Identity<'a> {
    id: &'a str,
    name: String,
    email: &'a str,
    role: Option<&'a str>,
    super_admin: bool,
}

impl<'a> Identity<'a> {
    fn of(user: &'a User) -> Self {
        Self {
            id: user.id.as_str(),
            name: user.display_name(),
            email: &user.email,
            role: user.role_name(),
            super_admin: user.is_super_admin,
        }
    }
}

/// Sign in and persist the session.
pub async fn login(console: &Console, args: &LoginArgs) -> AppResult<()> {
    let email = match &args.email {
        Some(e) => e.clone(),
        None => prompt::input("Email")?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt::password("Password")?,
    };

    let user = console.session().login(&email, &password).await?;
    info!(user_id = %user.id, "Signed in");
    output::print_success(&format!("Signed in as {}", user.display_name()));
    print_identity(&user, console.format());
    Ok(())
}

/// Clear the session.
pub fn logout(console: &Console) {
    console.session().logout();
    output::print_success("Signed out");
}

/// Print the verified user.
pub fn whoami(console: &Console, user: &User) {
    print_identity(user, console.format());
}

fn print_identity(user: &User, format: OutputFormat) {
    let identity = Identity::of(user);
    match format {
        OutputFormat::Table => {
            output::print_kv("ID", identity.id);
            output::print_kv("Name", &identity.name);
            output::print_kv("Email", identity.email);
            output::print_kv("Role", identity.role.unwrap_or("-"));
            output::print_kv("Super admin", if identity.super_admin { "yes" } else { "no" });
        }
        OutputFormat::Json => output::print_json(&identity),
    }
}

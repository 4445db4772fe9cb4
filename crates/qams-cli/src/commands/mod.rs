//! CLI command definitions and dispatch.

pub mod accreditations;
pub mod audit;
pub mod clients;
pub mod crud;
pub mod dashboard;
pub mod departments;
pub mod questions;
pub mod roles;
pub mod session;
pub mod templates;
pub mod users;

use clap::{Parser, Subcommand};

use qams_core::config::AppConfig;
use qams_core::result::AppResult;

use crate::context::Console;
use crate::output::OutputFormat;

/// QAMS super-admin console
#[derive(Debug, Parser)]
#[command(name = "qams-admin", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without the .toml extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Configuration overlay loaded from config/{env}.toml
    #[arg(long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Skip delete confirmation prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in as a super admin
    Login(session::LoginArgs),
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show headline statistics
    Dashboard,
    /// Client management
    Clients(clients::ClientArgs),
    /// User management
    Users(users::UserArgs),
    /// Role management
    Roles(roles::RoleArgs),
    /// Department management
    Departments(departments::DepartmentArgs),
    /// Onboarding question management
    Questions(questions::QuestionArgs),
    /// Onboarding template management
    Templates(templates::TemplateArgs),
    /// Accreditation lookup
    Accreditations(accreditations::AccreditationArgs),
    /// Activity log
    Audit(audit::AuditArgs),
}

impl Cli {
    /// Parse arguments from the process command line.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Environment overlay name: `--env`, then `QAMS_ENV`, then
    /// `development`.
    pub fn environment(&self) -> String {
        self.env
            .clone()
            .or_else(|| std::env::var("QAMS_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    /// Load the configuration this invocation asks for.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        AppConfig::load_from(&self.config, &self.environment())
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let console = Console::build(config, self.format, self.yes)?;
        self.run(&console).await
    }

    /// Execute against an already-built console.
    pub async fn run(&self, console: &Console) -> AppResult<()> {
        match &self.command {
            Commands::Login(args) => return session::login(console, args).await,
            Commands::Logout => {
                session::logout(console);
                return Ok(());
            }
            _ => {}
        }

        let user = console.require_session().await?;

        match &self.command {
            Commands::Whoami => {
                session::whoami(console, &user);
                Ok(())
            }
            Commands::Dashboard => dashboard::execute(console).await,
            Commands::Clients(args) => clients::execute(args, console).await,
            Commands::Users(args) => users::execute(args, console).await,
            Commands::Roles(args) => roles::execute(args, console).await,
            Commands::Departments(args) => departments::execute(args, console).await,
            Commands::Questions(args) => questions::execute(args, console).await,
            Commands::Templates(args) => templates::execute(args, console).await,
            Commands::Accreditations(args) => accreditations::execute(args, console).await,
            Commands::Audit(args) => audit::execute(args, console).await,
            Commands::Login(_) | Commands::Logout => Ok(()),
        }
    }
}

//! QAMS admin console entry point.
//!
//! Loads configuration, initialises logging, and runs the requested
//! command.

use tracing_subscriber::{EnvFilter, fmt};

use qams_cli::Cli;
use qams_cli::output;
use qams_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::from_args();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::debug!(env = %cli.environment(), base_url = %config.api.base_url, "Configuration loaded");

    if let Err(e) = cli.execute(config).await {
        tracing::debug!(kind = %e.kind, "Command failed");
        output::print_error(&e.user_message());
        std::process::exit(1);
    }
}

/// Initialize tracing/logging on stderr so command output stays clean
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

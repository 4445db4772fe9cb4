//! Dashboard statistics command.

use qams_core::result::AppResult;
use qams_console::DashboardStats;

use crate::context::Console;
use crate::output::{self, OutputFormat};

/// Print the dashboard cards.
pub async fn execute(console: &Console) -> AppResult<()> {
    let clients = console.clients();
    let users = console.users();
    let stats = DashboardStats::load(clients.as_ref(), users.as_ref(), console.console_config()).await?;

    match console.format() {
        OutputFormat::Table => {
            output::print_kv("Total clients", &stats.total_clients.to_string());
            output::print_kv("Total users", &stats.total_users.to_string());
            output::print_kv("Active users", &stats.active_users.to_string());
            output::print_kv("Inactive users", &stats.inactive_users.to_string());
        }
        OutputFormat::Json => output::print_json(&stats),
    }
    Ok(())
}

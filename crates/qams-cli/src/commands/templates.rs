//! Onboarding template commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_client::resources::TemplateFilters;
use qams_core::result::AppResult;
use qams_core::types::TemplateId;
use qams_entity::template::{OnboardingTemplate, TemplateType};

use super::crud::{self, PayloadArgs};
use crate::context::Console;
use crate::output;

/// Arguments for template commands
#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template subcommand
    #[command(subcommand)]
    pub command: TemplateCommand,
}

/// Template subcommands
#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// List templates
    List {
        /// Search template names
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by template type (document, form_and_logs, incident_report, capa)
        #[arg(long = "type")]
        template_type: Option<TemplateType>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Show a template by its business template ID
    Show {
        /// Template ID (e.g. TPL-001)
        template_id: String,
    },
    /// Create a template from a JSON payload
    Create(PayloadArgs),
    /// Update a template from a JSON payload
    Update {
        /// Template record ID
        id: TemplateId,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a template
    Delete {
        /// Template record ID
        id: TemplateId,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct TemplateRow {
    id: String,
    template_id: String,
    name: String,
    #[tabled(rename = "type")]
    template_type: String,
    accreditations: String,
    triggers: usize,
    updated_at: String,
}

fn row(t: &OnboardingTemplate) -> TemplateRow {
    TemplateRow {
        id: t.id.to_string(),
        template_id: t.template_id.clone(),
        name: output::truncate(&t.name, 40),
        template_type: t.template_type.label().to_string(),
        accreditations: t.accreditation.join(", "),
        triggers: t.trigger_ids.len(),
        updated_at: output::fmt_time(t.updated_at),
    }
}

/// Execute template commands
pub async fn execute(args: &TemplateArgs, console: &Console) -> AppResult<()> {
    let templates = console.templates();
    match &args.command {
        TemplateCommand::List {
            search,
            template_type,
            page,
        } => {
            let filters = TemplateFilters {
                search: search.clone(),
                template_type: *template_type,
            };
            crud::list(console, templates, filters, *page, row).await
        }
        TemplateCommand::Show { template_id } => {
            let template = templates.get_by_template_id(template_id).await?;
            output::print_item(&template, console.format());
            Ok(())
        }
        TemplateCommand::Create(payload) => crud::create(console, templates, payload.read()?).await,
        TemplateCommand::Update { id, payload } => {
            crud::update(console, templates, id.clone(), payload.read()?).await
        }
        TemplateCommand::Delete { id } => crud::delete(console, templates, id.clone()).await,
    }
}

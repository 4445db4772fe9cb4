//! Onboarding question commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qams_client::resources::QuestionFilters;
use qams_core::result::AppResult;
use qams_core::types::QuestionId;
use qams_entity::question::{CreateQuestion, Question, QuestionType, UpdateQuestion};

use super::crud::{self, PayloadArgs};
use crate::context::Console;
use crate::output;

/// Arguments for question commands
#[derive(Debug, Args)]
pub struct QuestionArgs {
    /// Question subcommand
    #[command(subcommand)]
    pub command: QuestionCommand,
}

/// Question subcommands
#[derive(Debug, Subcommand)]
pub enum QuestionCommand {
    /// List questions
    List {
        /// Search question titles
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by facility type
        #[arg(long)]
        facility_type: Option<String>,
        /// Filter by question type (single, multi)
        #[arg(long = "type")]
        question_type: Option<QuestionType>,
        /// Filter by active flag
        #[arg(long)]
        active: Option<bool>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Show a question by its business question ID
    Show {
        /// Question ID (e.g. Q-001)
        question_id: String,
    },
    /// Create a question from a JSON payload
    Create(PayloadArgs),
    /// Update a question from a JSON payload
    Update {
        /// Question record ID
        id: QuestionId,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a question
    Delete {
        /// Question record ID
        id: QuestionId,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct QuestionRow {
    id: String,
    question_id: String,
    title: String,
    #[tabled(rename = "type")]
    question_type: String,
    options: usize,
    facility_types: String,
    active: String,
}

fn row(q: &Question) -> QuestionRow {
    QuestionRow {
        id: q.id.to_string(),
        question_id: q.question_id.clone(),
        title: output::truncate(&q.question_title, 48),
        question_type: q.question_type.to_string(),
        options: q.options.len(),
        facility_types: q.facility_type.join(", "),
        active: match q.is_active {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        }
        .to_string(),
    }
}

/// Execute question commands
pub async fn execute(args: &QuestionArgs, console: &Console) -> AppResult<()> {
    let questions = console.questions();
    match &args.command {
        QuestionCommand::List {
            search,
            facility_type,
            question_type,
            active,
            page,
        } => {
            let filters = QuestionFilters {
                search: search.clone(),
                facility_type: facility_type.clone(),
                question_type: *question_type,
                is_active: *active,
            };
            crud::list(console, questions, filters, *page, row).await
        }
        QuestionCommand::Show { question_id } => {
            let question = questions.get_by_question_id(question_id).await?;
            output::print_item(&question, console.format());
            Ok(())
        }
        QuestionCommand::Create(payload) => {
            let draft: CreateQuestion = payload.read()?;
            crud::create(console, questions, draft.normalized()).await
        }
        QuestionCommand::Update { id, payload } => {
            let draft: UpdateQuestion = payload.read()?;
            crud::update(console, questions, id.clone(), draft.normalized()).await
        }
        QuestionCommand::Delete { id } => crud::delete(console, questions, id.clone()).await,
    }
}

//! Onboarding question entities.

pub mod model;

pub use model::{CreateQuestion, Question, QuestionOption, QuestionType, UpdateQuestion};

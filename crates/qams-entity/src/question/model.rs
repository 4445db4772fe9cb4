//! Onboarding question model and payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use qams_core::types::QuestionId;

use crate::de::one_or_many;

/// Whether a question accepts one or several options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Exactly one option may be chosen.
    #[default]
    Single,
    /// Any number of options may be chosen.
    Multi,
}

impl QuestionType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = qams_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            _ => Err(qams_core::AppError::validation(format!(
                "Invalid question type: '{s}'. Expected one of: single, multi"
            ))),
        }
    }
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Stable option key, referenced by template trigger ids.
    pub id: String,
    /// Text shown to the respondent.
    pub label: String,
}

impl QuestionOption {
    /// Whether both the key and the label carry text.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.label.trim().is_empty()
    }
}

/// An onboarding question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: QuestionId,
    /// Business key of the question (e.g. `"Q1"`).
    pub question_id: String,
    /// Question text.
    pub question_title: String,
    /// Optional help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Single or multiple choice.
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    /// Selectable answers.
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    /// Facility types the question applies to.
    #[serde(default, deserialize_with = "one_or_many")]
    pub facility_type: Vec<String>,
    /// Display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Whether the question is shown during onboarding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// When the question was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the question was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data required to create a new question.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestion {
    /// Business key of the question.
    #[validate(length(min = 1, message = "Question ID is required"))]
    pub question_id: String,
    /// Question text.
    #[validate(length(min = 1, message = "Question title is required"))]
    pub question_title: String,
    /// Optional help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Single or multiple choice.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Selectable answers.
    #[validate(length(min = 1, message = "At least one option is required"))]
    pub options: Vec<QuestionOption>,
    /// Facility types, always a list; omitted when empty.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub facility_type: Vec<String>,
    /// Display order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Whether the question is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CreateQuestion {
    /// Drop options missing a key or label and blank facility types.
    ///
    /// Run before validation so a draft with only blank option rows fails
    /// the "at least one option" rule.
    pub fn normalized(mut self) -> Self {
        self.options.retain(QuestionOption::is_complete);
        self.facility_type.retain(|f| !f.trim().is_empty());
        self
    }
}

impl From<&Question> for CreateQuestion {
    fn from(q: &Question) -> Self {
        Self {
            question_id: q.question_id.clone(),
            question_title: q.question_title.clone(),
            description: q.description.clone(),
            question_type: q.question_type,
            options: q.options.clone(),
            facility_type: q.facility_type.clone(),
            order: q.order,
            is_active: q.is_active,
        }
    }
}

/// Data for updating an existing question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestion {
    /// New business key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    /// New question text.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Question title is required"))]
    pub question_title: Option<String>,
    /// New help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New choice type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    /// Replacement options.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "At least one option is required"))]
    pub options: Option<Vec<QuestionOption>>,
    /// Replacement facility types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<Vec<String>>,
    /// New display order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// New active flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateQuestion {
    /// Drop incomplete options and blank facility types.
    pub fn normalized(mut self) -> Self {
        if let Some(options) = self.options.as_mut() {
            options.retain(QuestionOption::is_complete);
        }
        if let Some(types) = self.facility_type.as_mut() {
            types.retain(|f| !f.trim().is_empty());
        }
        self
    }
}

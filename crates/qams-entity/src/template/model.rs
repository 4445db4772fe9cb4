//! Onboarding template model and payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use qams_core::types::TemplateId;

use crate::de::one_or_many;

/// Category of artefact an onboarding template produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// Controlled document.
    #[default]
    Document,
    /// Form and log sheet.
    FormAndLogs,
    /// Incident report.
    IncidentReport,
    /// Corrective and preventive action.
    Capa,
}

impl TemplateType {
    /// Every template type, in display order.
    pub const ALL: [TemplateType; 4] = [
        Self::Document,
        Self::FormAndLogs,
        Self::IncidentReport,
        Self::Capa,
    ];

    /// Return the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::FormAndLogs => "form_and_logs",
            Self::IncidentReport => "incident_report",
            Self::Capa => "capa",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::FormAndLogs => "Form and Logs",
            Self::IncidentReport => "Incident Report",
            Self::Capa => "CAPA",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = qams_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                qams_core::AppError::validation(format!(
                    "Invalid template type: '{s}'. Expected one of: document, form_and_logs, incident_report, capa"
                ))
            })
    }
}

/// An onboarding template, instantiated for a client when the answers
/// to its trigger questions match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTemplate {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: TemplateId,
    /// Business key of the template.
    #[serde(rename = "id", default)]
    pub template_id: String,
    /// Template name.
    pub name: String,
    /// Artefact category.
    #[serde(default)]
    pub template_type: TemplateType,
    /// Free-form sub-type.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Accreditations the template satisfies.
    #[serde(default, deserialize_with = "one_or_many")]
    pub accreditation: Vec<String>,
    /// Facility types the template applies to.
    #[serde(default, deserialize_with = "one_or_many")]
    pub facility_type: Vec<String>,
    /// Question or option keys that trigger this template.
    #[serde(default, deserialize_with = "one_or_many")]
    pub trigger_ids: Vec<String>,
    /// Related document references.
    #[serde(default, deserialize_with = "one_or_many")]
    pub related_documents: Vec<String>,
    /// Template body.
    #[serde(default)]
    pub content: String,
    /// When the template was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the template was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data required to create a new template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplate {
    /// Business key of the template.
    #[serde(rename = "id")]
    #[validate(length(min = 1, message = "Template ID is required"))]
    pub template_id: String,
    /// Template name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Artefact category.
    pub template_type: TemplateType,
    /// Free-form sub-type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Accreditations the template satisfies.
    #[validate(length(min = 1, message = "At least one accreditation is required"))]
    pub accreditation: Vec<String>,
    /// Facility types the template applies to.
    pub facility_type: Vec<String>,
    /// Question or option keys that trigger this template.
    #[validate(length(min = 1, message = "At least one trigger ID is required"))]
    pub trigger_ids: Vec<String>,
    /// Related document references.
    pub related_documents: Vec<String>,
    /// Template body.
    pub content: String,
}

impl From<&OnboardingTemplate> for CreateTemplate {
    fn from(t: &OnboardingTemplate) -> Self {
        Self {
            template_id: t.template_id.clone(),
            name: t.name.clone(),
            template_type: t.template_type,
            kind: t.kind.clone(),
            accreditation: t.accreditation.clone(),
            facility_type: t.facility_type.clone(),
            trigger_ids: t.trigger_ids.clone(),
            related_documents: t.related_documents.clone(),
            content: t.content.clone(),
        }
    }
}

/// Data for updating an existing template. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    /// New business key.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<TemplateType>,
    /// New sub-type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Replacement accreditations.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "At least one accreditation is required"))]
    pub accreditation: Option<Vec<String>>,
    /// Replacement facility types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<Vec<String>>,
    /// Replacement trigger keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "At least one trigger ID is required"))]
    pub trigger_ids: Option<Vec<String>>,
    /// Replacement related documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_documents: Option<Vec<String>>,
    /// New body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

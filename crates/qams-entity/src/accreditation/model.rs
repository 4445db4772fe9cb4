//! Accreditation model (read-only lookup data).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qams_core::types::AccreditationId;

/// An accreditation scheme a template can satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accreditation {
    /// Unique accreditation identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: AccreditationId,
    /// Scheme name.
    #[serde(default)]
    pub name: String,
    /// Short code.
    #[serde(default)]
    pub code: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Scheme type.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Scheme status.
    #[serde(default)]
    pub status: String,
    /// Issuing authority.
    #[serde(default)]
    pub authority: String,
    /// Country of the authority.
    #[serde(default)]
    pub country: String,
    /// Validity period in months.
    #[serde(default)]
    pub validity_period: i64,
    /// Authority website.
    #[serde(default)]
    pub website: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Requirement summaries.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Owning client; absent for platform-wide schemes.
    #[serde(default)]
    pub client: Option<String>,
    /// When the accreditation was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Accreditation {
    /// Value used in template accreditation lists: the name, or the code
    /// when the name is blank.
    pub fn option_label(&self) -> Option<&str> {
        [self.name.as_str(), self.code.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
    }
}

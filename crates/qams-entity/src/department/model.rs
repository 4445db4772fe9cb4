//! Department entity model and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use qams_core::types::DepartmentId;

/// An organizational unit within a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Unique department identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: DepartmentId,
    /// Department name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning client id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// When the department was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the department was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data required to create a new department.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDepartment {
    /// Department name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning client id.
    #[validate(length(min = 1, message = "Client is required"))]
    pub client: String,
}

/// Data for updating an existing department.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDepartment {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New owning client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

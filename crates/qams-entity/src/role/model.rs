//! Role entity model and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use qams_core::types::RoleId;

use super::permission::validate_permissions;

/// A named set of permissions scoped to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique role identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning client id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// When the role was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the role was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn check_permissions(permissions: &Vec<String>) -> Result<(), ValidationError> {
    validate_permissions(permissions)
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRole {
    /// Role name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Granted permissions.
    #[validate(custom(function = "check_permissions"))]
    pub permissions: Vec<String>,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning client id.
    #[validate(length(min = 1, message = "Client is required"))]
    pub client: String,
}

/// Data for updating an existing role. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRole {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    /// Replacement permission set.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "check_permissions"))]
    pub permissions: Option<Vec<String>>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New owning client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl CreateRole {
    /// Toggle a permission on or off, keeping insertion order.
    pub fn toggle_permission(&mut self, permission: &str) {
        if let Some(pos) = self.permissions.iter().position(|p| p == permission) {
            self.permissions.remove(pos);
        } else {
            self.permissions.push(permission.to_string());
        }
    }
}

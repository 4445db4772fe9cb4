//! User entity model and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use qams_core::types::UserId;

use super::status::UserStatus;
use crate::client::Client;
use crate::department::Department;
use crate::reference::Ref;
use crate::role::Role;

/// A platform user as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Email address, also the login name.
    pub email: String,
    /// Assigned role.
    #[serde(default)]
    pub role: Option<Ref<Role>>,
    /// Assigned department.
    #[serde(default)]
    pub department: Option<Ref<Department>>,
    /// Account status.
    #[serde(default)]
    pub status: UserStatus,
    /// Clients the user belongs to.
    #[serde(default)]
    pub clients: Vec<Ref<Client>>,
    /// Signature image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Grants access to the admin console. Absent means `false`.
    #[serde(default)]
    pub is_super_admin: bool,
    /// When the user was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the user was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last" display name.
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.email)
    }

    /// Name of the populated role, if any.
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref()?.embedded().map(|r| r.name.as_str())
    }

    /// Name of the populated department, if any.
    pub fn department_name(&self) -> Option<&str> {
        self.department.as_ref()?.embedded().map(|d| d.name.as_str())
    }

    /// Lightweight summary of this user.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Lightweight user summary, used for audit-log actors and the actor
/// autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique user identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

impl UserSummary {
    /// "First Last" display name.
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.email)
    }

    /// Upper-cased initials, `"U"` when no name is known.
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|s| s.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

fn display_name(first: &str, last: &str, email: &str) -> String {
    let name = format!("{} {}", first.trim(), last.trim());
    let name = name.trim();
    if name.is_empty() {
        email.to_string()
    } else {
        name.to_string()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Given name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Role to assign.
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    /// Department to assign.
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    /// Initial status (defaults to invited on the backend).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// Whether the user may access this console.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_super_admin: Option<bool>,
}

/// Data for updating an existing user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    /// New role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// New department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// New console access flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_super_admin: Option<bool>,
}

/// Password change payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePassword {
    /// The user's current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// The replacement password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_populated_user() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "role": {"_id": "r1", "name": "Quality Manager", "permissions": ["manage users"]},
            "department": "d1",
            "status": "active",
            "clients": ["c1"],
            "isSuperAdmin": true,
            "createdAt": "2024-01-05T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert_eq!(user.role_name(), Some("Quality Manager"));
        assert_eq!(user.department.as_ref().and_then(|d| d.id()), Some("d1"));
        assert!(user.is_super_admin);
    }

    #[test]
    fn test_missing_super_admin_flag_is_false() {
        let user: User = serde_json::from_value(json!({"_id": "u2", "email": "x@example.com"})).unwrap();
        assert!(!user.is_super_admin);
        assert_eq!(user.display_name(), "x@example.com");
    }

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            role: "r1".into(),
            department: "d1".into(),
            status: None,
            is_super_admin: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateUser {
            email: "not-an-email".into(),
            password: "123".into(),
            ..valid
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_summary_initials() {
        let summary = UserSummary {
            id: UserId::new("u1"),
            first_name: "grace".into(),
            last_name: "hopper".into(),
            email: "g@example.com".into(),
        };
        assert_eq!(summary.initials(), "GH");
        let blank = UserSummary {
            first_name: String::new(),
            last_name: String::new(),
            ..summary
        };
        assert_eq!(blank.initials(), "U");
    }
}

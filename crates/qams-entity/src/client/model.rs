//! Client entity model and payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use qams_core::types::{ClientId, UserId};

use crate::reference::Ref;
use crate::user::UserSummary;

/// Kind of organization a client represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    /// Hospital.
    Hospital,
    /// Laboratory.
    Laboratory,
    /// Clinic.
    Clinic,
    /// Pharmacy.
    Pharmacy,
    /// Anything else.
    Other,
}

impl ClientType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Laboratory => "laboratory",
            Self::Clinic => "clinic",
            Self::Pharmacy => "pharmacy",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = qams_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hospital" => Ok(Self::Hospital),
            "laboratory" => Ok(Self::Laboratory),
            "clinic" => Ok(Self::Clinic),
            "pharmacy" => Ok(Self::Pharmacy),
            "other" => Ok(Self::Other),
            _ => Err(qams_core::AppError::validation(format!(
                "Invalid client type: '{s}'. Expected one of: hospital, laboratory, clinic, pharmacy, other"
            ))),
        }
    }
}

/// A tenant organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ClientId,
    /// Organization name.
    pub name: String,
    /// Organization kind.
    #[serde(rename = "type")]
    pub client_type: ClientType,
    /// Free-form classification.
    #[serde(default)]
    pub classification: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Admin who created the client.
    #[serde(default)]
    pub created_by: Option<Ref<UserSummary>>,
    /// When the client was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the client was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data required to create a new client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClient {
    /// Organization name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Organization kind.
    #[serde(rename = "type")]
    pub client_type: ClientType,
    /// Free-form classification.
    #[validate(length(min = 1, message = "Classification is required"))]
    pub classification: String,
    /// Postal address.
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

/// Data for updating an existing client. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateClient {
    /// New organization name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    /// New organization kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub client_type: Option<ClientType>,
    /// New classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Classification is required"))]
    pub classification: Option<String>,
    /// New address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: Option<String>,
}

/// Body for adding a user to, or removing a user from, a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMembership {
    /// The user being added or removed.
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_bare_creator() {
        let client: Client = serde_json::from_value(json!({
            "_id": "c1",
            "name": "St. Mary",
            "type": "hospital",
            "classification": "tertiary",
            "address": "1 Main St",
            "createdBy": "u9"
        }))
        .unwrap();
        assert_eq!(client.client_type, ClientType::Hospital);
        assert_eq!(client.created_by.as_ref().and_then(|r| r.id()), Some("u9"));
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let update = UpdateClient {
            address: Some("2 Side St".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"address": "2 Side St"}));
    }

    #[test]
    fn test_create_requires_fields() {
        let create = CreateClient {
            name: String::new(),
            client_type: ClientType::Clinic,
            classification: "primary".into(),
            address: String::new(),
        };
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("address"));
    }
}

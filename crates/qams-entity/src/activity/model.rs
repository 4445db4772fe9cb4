//! Activity log entry model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qams_core::types::ActivityLogId;

use super::entity_tag::EntityTag;
use crate::user::UserSummary;

/// Kind of change recorded by an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A document was created.
    Insert,
    /// A document was modified.
    Update,
    /// A document was removed.
    Delete,
    /// Any operation this console does not recognize.
    #[serde(other)]
    Unknown,
}

impl Operation {
    /// Return the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Unknown => "unknown",
        }
    }

    /// Past-tense label shown in the log table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Insert => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
            Self::Unknown => "Updated",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = qams_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insert" | "created" => Ok(Self::Insert),
            "update" | "updated" => Ok(Self::Update),
            "delete" | "deleted" => Ok(Self::Delete),
            _ => Err(qams_core::AppError::validation(format!(
                "Invalid operation: '{s}'. Expected one of: insert, update, delete"
            ))),
        }
    }
}

/// The user a change is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Actor {
    /// The backend embedded a user summary.
    User(UserSummary),
    /// Only the user id was recorded.
    Id(String),
}

impl Actor {
    /// Display name; `"Unknown User"` for bare ids.
    pub fn display_name(&self) -> String {
        match self {
            Self::User(user) => user.display_name(),
            Self::Id(_) => "Unknown User".to_string(),
        }
    }

    /// Email; `"-"` for bare ids.
    pub fn email(&self) -> &str {
        match self {
            Self::User(user) => &user.email,
            Self::Id(_) => "-",
        }
    }

    /// Initials; `"U"` for bare ids.
    pub fn initials(&self) -> String {
        match self {
            Self::User(user) => user.initials(),
            Self::Id(_) => "U".to_string(),
        }
    }

    /// The actor's user id in either shape.
    pub fn user_id(&self) -> &str {
        match self {
            Self::User(user) => user.id.as_str(),
            Self::Id(id) => id,
        }
    }
}

/// An immutable audit-trail record of one change to one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    /// Entry identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ActivityLogId,
    /// Kind of audited resource.
    pub entity: EntityTag,
    /// Identifier of the audited resource.
    #[serde(default)]
    pub entity_id: String,
    /// Denormalized name of the audited resource.
    #[serde(default)]
    pub entity_name: String,
    /// Kind of change.
    pub operation: Operation,
    /// Snapshot before the change; absent for inserts.
    #[serde(default)]
    pub from: Option<serde_json::Value>,
    /// Snapshot after the change; absent for deletes.
    #[serde(default)]
    pub to: Option<serde_json::Value>,
    /// Who made the change.
    #[serde(default)]
    pub by: Option<Actor>,
    /// When the change happened.
    #[serde(rename = "ts", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Actor display name, `"Unknown User"` when unattributed.
    pub fn actor_name(&self) -> String {
        self.by
            .as_ref()
            .map(Actor::display_name)
            .unwrap_or_else(|| "Unknown User".to_string())
    }

    /// Actor email, `"-"` when unattributed.
    pub fn actor_email(&self) -> &str {
        self.by.as_ref().map(Actor::email).unwrap_or("-")
    }

    /// Top-level keys whose values differ between `from` and `to`, sorted.
    pub fn changed_fields(&self) -> Vec<String> {
        let empty = serde_json::Map::new();
        let before = self.from.as_ref().and_then(|v| v.as_object()).unwrap_or(&empty);
        let after = self.to.as_ref().and_then(|v| v.as_object()).unwrap_or(&empty);
        let mut keys: Vec<String> = before
            .keys()
            .chain(after.keys())
            .filter(|k| before.get(*k) != after.get(*k))
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

//! References that the backend either populates or leaves as a bare id.

use serde::{Deserialize, Serialize};

/// A related document that may arrive embedded or as its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    /// The backend populated the related document.
    Embedded(T),
    /// Only the identifier was returned.
    Id(String),
}

impl<T> Ref<T> {
    /// The embedded document, if populated.
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Self::Embedded(inner) => Some(inner),
            Self::Id(_) => None,
        }
    }

    /// The bare identifier, if not populated.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Embedded(_) => None,
            Self::Id(id) => Some(id),
        }
    }
}

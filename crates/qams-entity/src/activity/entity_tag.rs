//! Entity tag vocabulary for audited resource types.
//!
//! The tag is an open string enum: tags the console does not know are
//! carried through unchanged so the backend can add resource types
//! without a console release.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Known tags with their display labels, in dropdown order.
pub const KNOWN_TAGS: [(&str, &str); 26] = [
    ("role", "Role"),
    ("user", "User"),
    ("client", "Client"),
    ("department", "Department"),
    ("document", "Document"),
    ("document_type", "Document Type"),
    ("document_settings", "Document Settings"),
    ("document_template", "Document Template"),
    ("workflow", "Workflow"),
    ("accreditation", "Accreditation"),
    ("form", "Form"),
    ("submission", "Submission"),
    ("capa", "CAPA"),
    ("capa_category", "CAPA Category"),
    ("escalation_rule", "Escalation Rule"),
    ("form_capa_settings", "Form CAPA Settings"),
    ("root_cause_method", "Root Cause Method"),
    ("checklist", "Checklist"),
    ("checklist_execution", "Checklist Execution"),
    ("equipment", "Equipment"),
    ("template", "Template"),
    ("question", "Question"),
    ("action", "Action"),
    ("committee", "Committee"),
    ("meeting", "Meeting"),
    ("governance", "Governance"),
];

/// Tag naming the kind of resource an audit entry concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityTag(String);

impl EntityTag {
    /// Create a tag from its wire value.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The wire value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag is part of the known vocabulary.
    pub fn is_known(&self) -> bool {
        KNOWN_TAGS.iter().any(|(tag, _)| *tag == self.0)
    }

    /// Display label; unknown tags are title-cased from their wire value.
    pub fn label(&self) -> String {
        if let Some((_, label)) = KNOWN_TAGS.iter().find(|(tag, _)| *tag == self.0) {
            return (*label).to_string();
        }
        self.0
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every known tag.
    pub fn known() -> impl Iterator<Item = EntityTag> {
        KNOWN_TAGS.iter().map(|(tag, _)| EntityTag::new(*tag))
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_labels() {
        assert_eq!(EntityTag::new("capa_category").label(), "CAPA Category");
        assert!(EntityTag::new("meeting").is_known());

        let future = EntityTag::new("risk_register");
        assert!(!future.is_known());
        assert_eq!(future.label(), "Risk Register");
    }

    #[test]
    fn test_unknown_tag_deserializes() {
        let tag: EntityTag = serde_json::from_str("\"training_record\"").unwrap();
        assert_eq!(tag.as_str(), "training_record");
    }
}

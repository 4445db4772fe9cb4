//! Deserialization helpers for inconsistent backend field shapes.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<String>),
    One(String),
}

/// Deserialize a field that is an array of strings, accepting the legacy
/// scalar form (a single string) and `null` as compatibility inputs.
///
/// The scalar form becomes a one-element list; an empty string and
/// `null` become an empty list.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::Many(items)) => items
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(OneOrMany::One(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

//! Response envelope normalization.
//!
//! Some backend responses wrap their payload as `{statusCode, data}`,
//! others return the payload bare. Both shapes are accepted on every
//! endpoint and normalized in exactly one place.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::result::AppResult;

/// A decoded response body in one of the two shapes the backend uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// `{statusCode, data}` wrapper around the payload.
    Wrapped {
        /// Status code echoed inside the body.
        status_code: u16,
        /// The real payload.
        data: T,
    },
    /// The payload itself.
    Bare(T),
}

impl Envelope<Value> {
    /// Classify a raw JSON body.
    ///
    /// A body is wrapped only when it is an object carrying both a
    /// `statusCode` and a `data` key; anything else is bare.
    pub fn classify(body: Value) -> Self {
        match body {
            Value::Object(mut map) if map.contains_key("statusCode") && map.contains_key("data") => {
                let status_code = map
                    .get("statusCode")
                    .and_then(Value::as_u64)
                    .and_then(|s| u16::try_from(s).ok())
                    .unwrap_or_default();
                let data = map.remove("data").unwrap_or(Value::Null);
                Self::Wrapped { status_code, data }
            }
            other => Self::Bare(other),
        }
    }
}

impl<T> Envelope<T> {
    /// Return the inner payload regardless of shape.
    pub fn into_payload(self) -> T {
        match self {
            Self::Wrapped { data, .. } => data,
            Self::Bare(data) => data,
        }
    }

    /// Whether the body used the `{statusCode, data}` wrapper.
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped { .. })
    }
}

/// Normalize a raw JSON body and deserialize the payload.
pub fn unwrap_payload<T: DeserializeOwned>(body: Value) -> AppResult<T> {
    let payload = Envelope::classify(body).into_payload();
    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Client {
        name: String,
    }

    #[test]
    fn test_both_shapes_unwrap_identically() {
        let wrapped: Vec<Client> =
            unwrap_payload(json!({"statusCode": 200, "data": [{"name": "St. Mary"}]})).unwrap();
        let bare: Vec<Client> = unwrap_payload(json!([{"name": "St. Mary"}])).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_paginated_body_without_status_code_is_bare() {
        let body = json!({"data": [1, 2], "total": 2});
        let envelope = Envelope::classify(body.clone());
        assert!(!envelope.is_wrapped());
        assert_eq!(envelope.into_payload(), body);
    }

    #[test]
    fn test_wrapped_paginated_body() {
        let envelope = Envelope::classify(json!({
            "statusCode": 200,
            "data": {"data": [1], "total": 1}
        }));
        assert!(envelope.is_wrapped());
        assert_eq!(envelope.into_payload(), json!({"data": [1], "total": 1}));
    }

    #[test]
    fn test_null_body_is_bare_null() {
        assert_eq!(Envelope::classify(Value::Null), Envelope::Bare(Value::Null));
    }
}

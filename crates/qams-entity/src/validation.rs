//! Helpers turning `validator` results into console errors.

use std::collections::BTreeMap;

use validator::{Validate, ValidationErrors};

use qams_core::error::AppError;
use qams_core::result::AppResult;

/// Per-field messages, keyed by field name in sorted order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten validation errors into inline per-field messages.
pub fn field_messages(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Validate a payload, mapping failures to a validation [`AppError`]
/// carrying the first message in field order.
pub fn check<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let message = field_messages(&errors)
            .into_values()
            .flatten()
            .next()
            .unwrap_or_else(|| "Validation failed".to_string());
        AppError::validation(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LoginCredentials;
    use qams_core::error::ErrorKind;

    #[test]
    fn test_check_reports_first_field_message() {
        let err = check(&LoginCredentials::new("nope", "123")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Please enter a valid email address");
    }

    #[test]
    fn test_field_messages_are_grouped() {
        let errors = LoginCredentials::new("", "1").validate().unwrap_err();
        let fields = field_messages(&errors);
        assert_eq!(fields.len(), 2);
        assert!(fields["password"].contains(&"Password must be at least 6 characters".to_string()));
        assert!(fields["email"].contains(&"Email is required".to_string()));
    }
}

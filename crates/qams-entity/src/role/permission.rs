//! Fixed permission vocabulary assignable to roles.

use std::borrow::Cow;

use validator::ValidationError;

/// Every permission a role may carry.
pub const PERMISSIONS: [&str; 22] = [
    "manage users",
    "manage roles",
    "manage departments",
    "manage equipment",
    "manage settings",
    "submit form",
    "review form",
    "approve form",
    "create capa",
    "review capa",
    "close capa",
    "create document",
    "review document",
    "approve document",
    "archive document",
    "perform checklist",
    "create checklist template",
    "manage risks",
    "view training",
    "manage training",
    "view reports",
    "view dashboard",
];

/// Whether a permission string belongs to the vocabulary.
pub fn is_known(permission: &str) -> bool {
    PERMISSIONS.contains(&permission)
}

/// Validator: every entry must be a known permission.
pub fn validate_permissions(permissions: &[String]) -> Result<(), ValidationError> {
    match permissions.iter().find(|p| !is_known(p)) {
        Some(unknown) => {
            let mut err = ValidationError::new("unknown_permission");
            err.message = Some(Cow::Owned(format!("Unknown permission: '{unknown}'")));
            Err(err)
        }
        None => Ok(()),
    }
}

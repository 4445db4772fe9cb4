//! Transient notifications raised by mutations.

use std::fmt;

/// Generic failure text when the backend gives no message.
pub const OPERATION_FAILED: &str = "Operation failed";

/// A toast-style notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The mutation succeeded.
    Success(String),
    /// The mutation failed.
    Error(String),
}

impl Notice {
    /// The notification text.
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }

    /// Whether this reports a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub(crate) fn done(entity: &str, verb: &str) -> Self {
        Self::Success(format!("{entity} {verb} successfully"))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

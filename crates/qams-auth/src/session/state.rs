//! In-memory session state.

use serde::Serialize;

use qams_entity::user::User;

/// Coarse lifecycle phase derived from a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No verified session.
    Anonymous,
    /// A login or re-verification is in flight.
    Authenticating,
    /// A verified super-admin session.
    Authenticated,
}

/// Snapshot of the authenticated session.
///
/// Only the session manager constructs or mutates sessions, and every
/// constructor upholds the invariant: `is_authenticated` implies a user,
/// a token, and the super-admin flag.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
    is_loading: bool,
}

impl Session {
    /// A verified session. Not authenticated unless the user is a super
    /// admin and the token is non-empty.
    pub(crate) fn verified(user: User, token: String) -> Self {
        let is_authenticated = user.is_super_admin && !token.trim().is_empty();
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated,
            is_loading: false,
        }
    }

    /// A restored session that has not been re-verified yet.
    pub(crate) fn unverified(user: Option<User>, token: Option<String>) -> Self {
        Self {
            user,
            token,
            is_authenticated: false,
            is_loading: false,
        }
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Drop user, token, and the authenticated flag, keeping the loading
    /// indicator untouched.
    pub(crate) fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }

    /// Replace identity fields from `other`, keeping the loading indicator.
    pub(crate) fn replace_identity(&mut self, other: Session) {
        self.user = other.user;
        self.token = other.token;
        self.is_authenticated = other.is_authenticated;
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The bearer credential, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether the session is a verified super-admin session.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Whether a lifecycle operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Authenticating
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    /// Whether the authentication invariant holds.
    pub fn is_consistent(&self) -> bool {
        !self.is_authenticated
            || (self.token.is_some() && self.user.as_ref().is_some_and(|u| u.is_super_admin))
    }
}

//! Sign-in navigation trait.

/// Performs the "go to the sign-in entry point" side effect.
///
/// Invoked after an explicit logout and after the request gateway tears
/// the session down on an unauthorized response.
pub trait SignInNavigator: Send + Sync + std::fmt::Debug + 'static {
    /// Navigate to the sign-in entry point.
    fn redirect_to_sign_in(&self);
}

//! Scope guard for the session loading indicator.

use std::sync::RwLock;

use super::state::Session;

/// Raises `is_loading` on creation and lowers it when dropped, so every
/// exit path of a lifecycle operation (success, handled failure, early
/// return, or panic) resolves the indicator.
#[derive(Debug)]
pub(crate) struct LoadingGuard<'a> {
    state: &'a RwLock<Session>,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn begin(state: &'a RwLock<Session>) -> Self {
        set_loading(state, true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        set_loading(self.state, false);
    }
}

fn set_loading(state: &RwLock<Session>, loading: bool) {
    match state.write() {
        Ok(mut session) => session.set_loading(loading),
        Err(poisoned) => poisoned.into_inner().set_loading(loading),
    }
}

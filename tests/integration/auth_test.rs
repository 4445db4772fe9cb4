//! Session lifecycle tests against the in-process fake backend.

mod helpers;

use std::sync::atomic::Ordering;

use qams_auth::SessionPhase;
use qams_auth::session::manager::ACCESS_DENIED;
use qams_core::error::ErrorKind;
use qams_core::traits::DurableStorage;

use helpers::{ADMIN_EMAIL, ADMIN_TOKEN, Harness, PASSWORD, STAFF_EMAIL};

#[tokio::test]
async fn test_super_admin_login_persists_and_reverifies() {
    let h = Harness::start().await;
    let manager = h.session_manager();

    let user = manager.login(ADMIN_EMAIL, PASSWORD).await.unwrap();
    assert!(user.is_super_admin);
    assert!(manager.is_authenticated());
    assert_eq!(h.token().as_deref(), Some(ADMIN_TOKEN));
    assert!(
        h.storage
            .get(&h.config.session.snapshot_key)
            .unwrap()
            .is_some()
    );

    // A restart restores the snapshot as a hint only.
    let restarted = h.session_manager();
    assert!(restarted.session().user().is_some());
    assert!(!restarted.is_authenticated());

    let session = restarted.initialize_auth().await;
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.user().map(|u| u.email.as_str()), Some(ADMIN_EMAIL));
    assert_eq!(h.state().requests_to("GET", "/api/users/me").len(), 1);
}

#[tokio::test]
async fn test_staff_login_is_denied_and_nothing_persisted() {
    let h = Harness::start().await;
    let manager = h.session_manager();

    let err = manager.login(STAFF_EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.message, ACCESS_DENIED);
    assert!(h.token().is_none());
    assert!(!manager.is_authenticated());
    assert!(!manager.session().is_loading());
}

#[tokio::test]
async fn test_wrong_password_reports_backend_message() {
    let h = Harness::start().await;
    let manager = h.session_manager();

    let err = manager.login(ADMIN_EMAIL, "not-the-password").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(h.navigator.count(), 0);
    assert!(h.token().is_none());
}

#[tokio::test]
async fn test_malformed_email_never_reaches_backend() {
    let h = Harness::start().await;
    let manager = h.session_manager();

    let err = manager.login("not-an-email", PASSWORD).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(h.state().requests().is_empty());
}

#[tokio::test]
async fn test_expired_credential_at_startup_clears_storage() {
    let h = Harness::start().await;
    h.session_manager().login(ADMIN_EMAIL, PASSWORD).await.unwrap();
    h.state().expired.store(true, Ordering::SeqCst);

    let restarted = h.session_manager();
    let session = restarted.initialize_auth().await;
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(session.user().is_none());
    assert!(h.token().is_none());
    assert!(
        h.storage
            .get(&h.config.session.snapshot_key)
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_no_credential_means_anonymous_without_request() {
    let h = Harness::start().await;
    let session = h.session_manager().initialize_auth().await;
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(h.state().requests().is_empty());
}

#[tokio::test]
async fn test_logout_clears_everything_and_is_repeatable() {
    let h = Harness::start().await;
    let manager = h.session_manager();
    manager.login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    manager.logout();
    assert!(!manager.is_authenticated());
    assert!(h.token().is_none());
    assert!(h.storage.is_empty());

    manager.logout();
    assert_eq!(h.navigator.count(), 2);
}

//! Request gateway tests against the in-process fake backend.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use qams_client::resources::{AuthApi, ClientFilters, ClientsApi};
use qams_client::{ApiGateway, MemoryStorage};
use qams_client::traits::{AuthBackend, Resource};
use qams_core::config::AppConfig;
use qams_core::error::ErrorKind;
use qams_core::types::{ClientId, PageRequest};
use qams_entity::client::UpdateClient;
use qams_entity::session::LoginCredentials;

use helpers::{ADMIN_TOKEN, CountingNavigator, Harness};

#[tokio::test]
async fn test_wrapped_and_bare_bodies_unwrap_identically() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let clients = ClientsApi::new(h.gateway.clone());

    let bare = clients
        .list(&ClientFilters::default(), PageRequest::first(10))
        .await
        .unwrap();
    h.state().wrap.store(true, Ordering::SeqCst);
    let wrapped = clients
        .list(&ClientFilters::default(), PageRequest::first(10))
        .await
        .unwrap();

    let names = |page: &qams_core::types::Paginated<qams_entity::client::Client>| {
        page.data.iter().map(|c| c.name.clone()).collect::<Vec<_>>()
    };
    assert_eq!(names(&bare), names(&wrapped));
    assert_eq!(bare.data.len(), 2);
}

#[tokio::test]
async fn test_bearer_credential_is_attached_when_stored() {
    let h = Harness::start().await;
    let auth = AuthApi::new(h.gateway.clone());

    let _ = auth.current_user().await;
    h.set_token(ADMIN_TOKEN);
    let user = auth.current_user().await.unwrap();
    assert!(user.is_super_admin);

    let calls = h.state().requests_to("GET", "/api/users/me");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].authorization, None);
    assert_eq!(
        calls[1].authorization.as_deref(),
        Some(format!("Bearer {ADMIN_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_unauthorized_signs_out_exactly_once() {
    let h = Harness::start().await;
    h.set_token("stale-token");
    let auth = AuthApi::new(h.gateway.clone());

    let first = auth.current_user().await.unwrap_err();
    assert_eq!(first.kind, ErrorKind::Authentication);
    assert!(h.token().is_none());
    assert!(h.gateway.has_signed_out());

    let second = auth.current_user().await.unwrap_err();
    assert_eq!(second.kind, ErrorKind::Authentication);
    assert_eq!(h.navigator.count(), 1);
}

#[tokio::test]
async fn test_invalid_credentials_do_not_sign_out() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let auth = AuthApi::new(h.gateway.clone());

    let err = auth
        .login(&LoginCredentials::new("admin@qams.test", "wrong-password"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(h.navigator.count(), 0);
    assert_eq!(h.token().as_deref(), Some(ADMIN_TOKEN));
}

#[tokio::test]
async fn test_delete_with_empty_body_succeeds() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let clients = ClientsApi::new(h.gateway.clone());

    clients.delete(&ClientId::new("c1")).await.unwrap();
    assert_eq!(h.state().requests_to("DELETE", "/api/clients/c1").len(), 1);
}

#[tokio::test]
async fn test_backend_message_is_surfaced() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let clients = ClientsApi::new(h.gateway.clone());

    let err = clients
        .update(
            &ClientId::new("missing"),
            &UpdateClient {
                name: Some("Renamed".into()),
                ..UpdateClient::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "Client not found");
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test]
async fn test_unanswered_request_times_out_as_retryable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let mut config = AppConfig::default();
    config.api.base_url = format!("http://{addr}/api");
    config.api.timeout_seconds = 1;
    let navigator = Arc::new(CountingNavigator::default());
    let gateway = Arc::new(
        ApiGateway::new(
            &config.api,
            &config.session,
            Arc::new(MemoryStorage::new()),
            navigator.clone(),
        )
        .unwrap(),
    );

    let err = ClientsApi::new(gateway)
        .list(&ClientFilters::default(), PageRequest::first(10))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
    assert!(err.is_retryable());
    assert_eq!(navigator.count(), 0);
}

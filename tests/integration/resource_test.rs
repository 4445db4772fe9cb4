//! Resource modules, form flows, and the command tree end to end.

mod helpers;

use std::sync::Arc;

use clap::Parser;

use qams_cli::context::NOT_SIGNED_IN;
use qams_cli::output::OutputFormat;
use qams_cli::{Cli, Console};
use qams_client::resources::{ClientFilters, ClientsApi, UsersApi};
use qams_client::traits::Resource;
use qams_console::{AssumeYes, Confirmation, DashboardStats, FormModal, SubmitOutcome};
use qams_core::error::ErrorKind;
use qams_core::types::PageRequest;
use qams_entity::client::{ClientType, CreateClient};

use helpers::{ADMIN_TOKEN, Harness};

/// Declines every prompt.
struct Decline;

impl Confirmation for Decline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

fn console(h: &Harness, confirmation: Box<dyn Confirmation>) -> Console {
    Console::with_parts(
        h.config.clone(),
        OutputFormat::Json,
        h.storage.clone(),
        h.navigator.clone(),
        confirmation,
    )
    .unwrap()
}

async fn run(console: &Console, args: &[&str]) -> qams_core::result::AppResult<()> {
    let mut argv = vec!["qams-admin"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().run(console).await
}

#[tokio::test]
async fn test_client_search_is_applied_locally() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let clients = ClientsApi::new(h.gateway.clone());

    let page = clients
        .list(
            &ClientFilters {
                search: Some("NORTH".into()),
            },
            PageRequest::first(10),
        )
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].client_type, ClientType::Laboratory);

    let calls = h.state().requests_to("GET", "/api/clients");
    assert!(!calls[0].query.contains_key("search"));
}

#[tokio::test]
async fn test_form_modal_validates_before_posting() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let mut modal = FormModal::new(Arc::new(ClientsApi::new(h.gateway.clone())));

    modal.open_create();
    let invalid = CreateClient {
        name: String::new(),
        client_type: ClientType::Clinic,
        classification: "primary".into(),
        address: "2 Side St".into(),
    };
    assert!(matches!(
        modal.submit_create(&invalid).await,
        SubmitOutcome::Invalid(_)
    ));
    assert!(modal.is_open());
    assert!(h.state().requests_to("POST", "/api/clients").is_empty());

    let valid = CreateClient {
        name: "Eastside Clinic".into(),
        ..invalid
    };
    match modal.submit_create(&valid).await {
        SubmitOutcome::Saved(client, notice) => {
            assert_eq!(client.name, "Eastside Clinic");
            assert_eq!(notice.message(), "Client created successfully");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!modal.is_open());
    assert_eq!(h.state().bodies()[0]["type"], "clinic");
}

#[tokio::test]
async fn test_dashboard_counts_loaded_records() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let stats = DashboardStats::load(
        &ClientsApi::new(h.gateway.clone()),
        &UsersApi::new(h.gateway.clone()),
        &h.config.console,
    )
    .await
    .unwrap();

    assert_eq!(
        stats,
        DashboardStats {
            total_clients: 2,
            total_users: 2,
            active_users: 1,
            inactive_users: 1,
        }
    );
}

#[tokio::test]
async fn test_commands_require_a_session() {
    let h = Harness::start().await;
    let console = console(&h, Box::new(AssumeYes));

    let err = run(&console, &["clients", "list"]).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, NOT_SIGNED_IN);
    assert!(h.state().requests_to("GET", "/api/clients").is_empty());
}

#[tokio::test]
async fn test_login_then_manage_clients() {
    let h = Harness::start().await;
    let console = console(&h, Box::new(AssumeYes));

    run(&console, &["login", "-e", "admin@qams.test", "-p", "secret123"])
        .await
        .unwrap();
    assert_eq!(h.token().as_deref(), Some(ADMIN_TOKEN));

    run(&console, &["clients", "list", "--search", "mary"]).await.unwrap();
    run(
        &console,
        &[
            "clients",
            "create",
            "--data",
            r#"{"name":"West Lab","type":"laboratory","classification":"reference","address":"4 West Ave"}"#,
        ],
    )
    .await
    .unwrap();
    assert_eq!(h.state().bodies()[0]["name"], "West Lab");

    run(&console, &["clients", "delete", "c2"]).await.unwrap();
    assert_eq!(h.state().requests_to("DELETE", "/api/clients/c2").len(), 1);

    let err = run(
        &console,
        &["clients", "update", "missing", "--data", r#"{"name":"Renamed"}"#],
    )
    .await
    .unwrap_err();
    assert_eq!(err.message, "Client not found");

    run(&console, &["logout"]).await.unwrap();
    assert!(h.token().is_none());
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let h = Harness::start().await;
    let console = console(&h, Box::new(Decline));
    run(&console, &["login", "-e", "admin@qams.test", "-p", "secret123"])
        .await
        .unwrap();

    run(&console, &["clients", "delete", "c1"]).await.unwrap();
    assert!(h.state().requests_to("DELETE", "/api/clients/c1").is_empty());
}

#[tokio::test]
async fn test_invalid_payload_is_rejected_locally() {
    let h = Harness::start().await;
    let console = console(&h, Box::new(AssumeYes));
    run(&console, &["login", "-e", "admin@qams.test", "-p", "secret123"])
        .await
        .unwrap();

    let err = run(
        &console,
        &[
            "clients",
            "create",
            "--data",
            r#"{"name":"","type":"clinic","classification":"x","address":"y"}"#,
        ],
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Name is required");
    assert!(h.state().requests_to("POST", "/api/clients").is_empty());
}

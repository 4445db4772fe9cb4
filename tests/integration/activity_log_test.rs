//! Activity log engine and actor autocomplete against the fake backend.

mod helpers;

use std::sync::Arc;

use chrono::NaiveDate;

use qams_client::resources::{ActivityLogsApi, UsersApi};
use qams_console::activity::{ActivityLogEngine, ActivityLogFilters, ActorAutocomplete, SuggestionState};
use qams_core::types::UserId;
use qams_entity::activity::{EntityTag, Operation};

use helpers::{ADMIN_TOKEN, Harness};

fn engine(h: &Harness) -> ActivityLogEngine {
    ActivityLogEngine::new(
        Arc::new(ActivityLogsApi::new(h.gateway.clone())),
        &h.config.console,
    )
}

#[tokio::test]
async fn test_filters_translate_to_backend_query() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let engine = engine(&h);

    engine.set_filters(ActivityLogFilters {
        actor_id: Some(UserId::new("u-admin")),
        entity_type: Some(EntityTag::new("onboarding_template")),
        operation: Some(Operation::Delete),
        entity_name: Some("   ".into()),
        from_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        to_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        ..ActivityLogFilters::default()
    });
    engine.settle().await;

    let calls = h.state().requests_to("GET", "/api/activity-logs");
    assert_eq!(calls.len(), 1);
    let q = &calls[0].query;
    assert_eq!(q.get("page").map(String::as_str), Some("1"));
    assert_eq!(q.get("pageSize").map(String::as_str), Some("20"));
    assert_eq!(q.get("by").map(String::as_str), Some("u-admin"));
    assert_eq!(q.get("entity").map(String::as_str), Some("onboarding_template"));
    assert_eq!(q.get("operation").map(String::as_str), Some("delete"));
    assert_eq!(q.get("fromDate").map(String::as_str), Some("2024-01-01T00:00:00.000Z"));
    assert_eq!(q.get("toDate").map(String::as_str), Some("2024-01-31T23:59:59.999Z"));
    assert!(!q.contains_key("entityName"));
    assert!(!q.contains_key("entityId"));

    let state = engine.state();
    let page = state.result.unwrap();
    assert_eq!(page.total, 45);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next_page);
    assert_eq!(page.items[0].operation, Operation::Delete);
    assert_eq!(page.items[0].actor_name(), "Ada Lovelace");
    assert_eq!(page.items[1].actor_name(), "Unknown User");

    engine.clear_filters();
    engine.settle().await;
    let calls = h.state().requests_to("GET", "/api/activity-logs");
    assert_eq!(calls.len(), 2);
    assert!(!calls[1].query.contains_key("by"));
    assert!(!calls[1].query.contains_key("fromDate"));
}

#[tokio::test]
async fn test_paging_follows_backend_flags() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let engine = engine(&h);

    engine.load().await;
    engine.next_page().await;
    assert_eq!(engine.state().page, 2);

    engine.go_to_page(3).await;
    engine.next_page().await;
    assert_eq!(engine.state().page, 3);

    engine.previous_page().await;
    assert_eq!(engine.state().page, 2);

    let pages: Vec<String> = h
        .state()
        .requests_to("GET", "/api/activity-logs")
        .into_iter()
        .filter_map(|r| r.query.get("page").cloned())
        .collect();
    assert_eq!(pages, vec!["1", "2", "3", "2"]);
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_page() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let engine = engine(&h);
    engine.load().await;
    assert!(engine.state().error.is_none());

    h.set_token("revoked");
    engine.refresh().await;

    let state = engine.state();
    assert!(state.error.is_some());
    assert_eq!(state.result.map(|p| p.items.len()), Some(2));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_actor_autocomplete_feeds_the_actor_filter() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let users = Arc::new(UsersApi::new(h.gateway.clone()));
    let actors = ActorAutocomplete::new(users, &h.config.console);

    actors.input("g");
    actors.settle().await;
    assert!(h.state().requests_to("GET", "/api/users").is_empty());

    actors.input("grace");
    actors.settle().await;
    let found = match actors.state().suggestions {
        SuggestionState::Results(users) => users,
        other => panic!("unexpected suggestions: {other:?}"),
    };
    assert_eq!(found.len(), 1);

    let searches = h.state().requests_to("GET", "/api/users");
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query.get("search").map(String::as_str), Some("grace"));
    assert_eq!(searches[0].query.get("limit").map(String::as_str), Some("10"));

    let actor = actors.select(found[0].clone());
    assert_eq!(actor, UserId::new("u-staff"));
    assert_eq!(actors.state().suggestions, SuggestionState::Idle);

    let engine = engine(&h);
    engine.update_filters(|f| f.actor_id = actors.selected_id());
    engine.settle().await;
    let logs = h.state().requests_to("GET", "/api/activity-logs");
    assert_eq!(logs[0].query.get("by").map(String::as_str), Some("u-staff"));
}

#[tokio::test]
async fn test_unmatched_actor_search_is_empty() {
    let h = Harness::start().await;
    h.set_token(ADMIN_TOKEN);
    let actors = ActorAutocomplete::new(
        Arc::new(UsersApi::new(h.gateway.clone())),
        &h.config.console,
    );
    actors.input("nobody-here");
    actors.settle().await;
    assert_eq!(actors.state().suggestions, SuggestionState::Empty);
}

//! Shared test helpers for integration tests.
//!
//! Spins up an in-process fake of the QAMS REST API on `127.0.0.1:0` and
//! wires the real gateway, resource modules, and session manager to it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use qams_client::ApiGateway;
use qams_client::MemoryStorage;
use qams_client::resources::AuthApi;
use qams_auth::SessionManager;
use qams_core::config::AppConfig;
use qams_core::traits::{DurableStorage, SignInNavigator};

pub const PASSWORD: &str = "secret123";
pub const ADMIN_EMAIL: &str = "admin@qams.test";
pub const STAFF_EMAIL: &str = "staff@qams.test";
pub const ADMIN_TOKEN: &str = "token-admin";
pub const STAFF_TOKEN: &str = "token-staff";

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

/// Mutable behaviour and recordings of the fake backend.
#[derive(Debug, Default)]
pub struct BackendState {
    pub requests: Mutex<Vec<Recorded>>,
    pub bodies: Mutex<Vec<Value>>,
    /// Wrap every success payload in `{statusCode, data}`.
    pub wrap: AtomicBool,
    /// Reject every authenticated call with 401.
    pub expired: AtomicBool,
}

impl BackendState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn reply(&self, status: StatusCode, payload: Value) -> Response {
        let body = if self.wrap.load(Ordering::SeqCst) {
            json!({"statusCode": status.as_u16(), "data": payload})
        } else {
            payload
        };
        (status, Json(body)).into_response()
    }
}

/// Fake backend bound to an ephemeral port.
pub struct FakeBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        let api = Router::new()
            .route("/users/login", post(login))
            .route("/users/me", get(me))
            .route("/users", get(list_users))
            .route("/clients", get(list_clients).post(create_client))
            .route("/clients/{id}", patch(update_client).delete(delete_client))
            .route("/activity-logs", get(activity_logs))
            .with_state(state.clone());
        let app = Router::new()
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(state.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    /// Configuration pointing at this backend.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.api.base_url = self.base_url.clone();
        config.api.timeout_seconds = 5;
        config
    }
}

/// Counts sign-in redirects.
#[derive(Debug, Default)]
pub struct CountingNavigator {
    pub redirects: AtomicUsize,
}

impl CountingNavigator {
    pub fn count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl SignInNavigator for CountingNavigator {
    fn redirect_to_sign_in(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// A gateway and session manager over one in-memory storage.
pub struct Harness {
    pub backend: FakeBackend,
    pub config: AppConfig,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<CountingNavigator>,
    pub gateway: Arc<ApiGateway>,
}

impl Harness {
    pub async fn start() -> Self {
        let backend = FakeBackend::start().await;
        let config = backend.config();
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(CountingNavigator::default());
        let gateway = Arc::new(
            ApiGateway::new(&config.api, &config.session, storage.clone(), navigator.clone())
                .unwrap(),
        );
        Self {
            backend,
            config,
            storage,
            navigator,
            gateway,
        }
    }

    pub fn state(&self) -> &BackendState {
        &self.backend.state
    }

    /// A fresh session manager over the shared storage, as after a restart.
    pub fn session_manager(&self) -> SessionManager {
        SessionManager::new(
            Arc::new(AuthApi::new(self.gateway.clone())),
            self.storage.clone(),
            self.navigator.clone(),
            &self.config.session,
        )
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(&self.config.session.token_key).unwrap()
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set(&self.config.session.token_key, token).unwrap();
    }
}

async fn record(State(state): State<Arc<BackendState>>, request: Request, next: Next) -> Response {
    let query = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .map(|Query(q)| q)
        .unwrap_or_default();
    let authorization = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(Recorded {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query,
        authorization,
    });
    next.run(request).await
}

fn admin() -> Value {
    json!({
        "_id": "u-admin",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": ADMIN_EMAIL,
        "status": "active",
        "isSuperAdmin": true
    })
}

fn staff() -> Value {
    json!({
        "_id": "u-staff",
        "firstName": "Grace",
        "lastName": "Hopper",
        "email": STAFF_EMAIL,
        "status": "invited"
    })
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"statusCode": 401, "message": message})),
    )
        .into_response()
}

/// Resolve the caller from the bearer header.
fn caller(state: &BackendState, headers: &HeaderMap) -> Option<Value> {
    if state.expired.load(Ordering::SeqCst) {
        return None;
    }
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(h) if h == format!("Bearer {ADMIN_TOKEN}") => Some(admin()),
        Some(h) if h == format!("Bearer {STAFF_TOKEN}") => Some(staff()),
        _ => None,
    }
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let (token, user) = match email {
        ADMIN_EMAIL if password == PASSWORD => (ADMIN_TOKEN, admin()),
        STAFF_EMAIL if password == PASSWORD => (STAFF_TOKEN, staff()),
        _ => return unauthorized("Invalid credentials"),
    };
    state.reply(StatusCode::OK, json!({"access_token": token, "user": user}))
}

async fn me(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    match caller(&state, &headers) {
        Some(user) => state.reply(StatusCode::OK, user),
        None => unauthorized("Unauthorized"),
    }
}

async fn list_users(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if caller(&state, &headers).is_none() {
        return unauthorized("Unauthorized");
    }
    let search = query.get("search").map(|s| s.to_lowercase()).unwrap_or_default();
    let users: Vec<Value> = [admin(), staff()]
        .into_iter()
        .filter(|u| {
            let name = format!("{} {} {}", u["firstName"], u["lastName"], u["email"]).to_lowercase();
            name.contains(&search)
        })
        .collect();
    let total = users.len();
    state.reply(
        StatusCode::OK,
        json!({"data": users, "total": total, "page": 1, "limit": 10, "totalPages": 1}),
    )
}

fn clients() -> Vec<Value> {
    vec![
        json!({"_id": "c1", "name": "St. Mary Hospital", "type": "hospital", "classification": "tertiary", "address": "1 Main St"}),
        json!({"_id": "c2", "name": "Northside Lab", "type": "laboratory", "classification": "reference", "address": "9 North Rd"}),
    ]
}

async fn list_clients(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if caller(&state, &headers).is_none() {
        return unauthorized("Unauthorized");
    }
    state.reply(StatusCode::OK, Value::Array(clients()))
}

async fn create_client(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if caller(&state, &headers).is_none() {
        return unauthorized("Unauthorized");
    }
    state.bodies.lock().unwrap().push(body.clone());
    let mut created = body;
    created["_id"] = json!("c3");
    state.reply(StatusCode::CREATED, created)
}

async fn update_client(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if caller(&state, &headers).is_none() {
        return unauthorized("Unauthorized");
    }
    let Some(mut client) = clients().into_iter().find(|c| c["_id"] == id.as_str()) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"statusCode": 404, "message": "Client not found"})),
        )
            .into_response();
    };
    if let (Some(target), Some(changes)) = (client.as_object_mut(), body.as_object()) {
        for (k, v) in changes {
            target.insert(k.clone(), v.clone());
        }
    }
    state.reply(StatusCode::OK, client)
}

async fn delete_client(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if caller(&state, &headers).is_none() {
        return unauthorized("Unauthorized");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn activity_logs(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if caller(&state, &headers).is_none() {
        return unauthorized("Unauthorized");
    }
    let page: u64 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let page_size: u64 = query.get("pageSize").and_then(|p| p.parse().ok()).unwrap_or(20);
    let total = 45u64;
    let total_pages = total.div_ceil(page_size);
    let entity = query.get("entity").cloned().unwrap_or_else(|| "client".to_string());
    let operation = query.get("operation").cloned().unwrap_or_else(|| "update".to_string());
    let items: Vec<Value> = (0..2)
        .map(|i| {
            let by = if i == 0 { admin() } else { json!("u-staff") };
            json!({
                "_id": format!("log-{page}-{i}"),
                "entity": entity,
                "entityId": "c1",
                "entityName": "St. Mary Hospital",
                "operation": operation,
                "from": {"name": "St. Mary"},
                "to": {"name": "St. Mary Hospital"},
                "by": by,
                "ts": "2024-01-05T12:00:00.000Z"
            })
        })
        .collect();
    state.reply(
        StatusCode::OK,
        json!({
            "items": items,
            "total": total,
            "page": page,
            "pageSize": page_size,
            "totalPages": total_pages,
            "hasNextPage": page < total_pages,
            "hasPreviousPage": page > 1
        }),
    )
}

//! Global request gateway.
//!
//! Every outbound call goes through [`ApiGateway`]: it attaches the
//! bearer credential from durable storage, normalizes the response
//! envelope, maps failures into [`AppError`], and performs the one-shot
//! global sign-out when the backend reports the session as unauthorized.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use qams_core::config::{ApiConfig, SessionConfig};
use qams_core::error::{AppError, ErrorKind, backend_message};
use qams_core::result::AppResult;
use qams_core::traits::{DurableStorage, SignInNavigator};
use qams_core::types::{QueryParams, unwrap_payload};

/// Backend message that marks a failed sign-in rather than an expired
/// session. Unauthorized responses carrying it do not sign the console out.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Authenticated HTTP client for the backend REST API.
#[derive(Debug)]
pub struct ApiGateway {
    /// Underlying HTTP client (timeout and user agent applied).
    http: reqwest::Client,
    /// Base URL every path is appended to.
    base_url: String,
    /// Storage key of the bearer credential.
    token_key: String,
    /// Durable storage holding the credential.
    storage: Arc<dyn DurableStorage>,
    /// Sign-in navigation side effect.
    navigator: Arc<dyn SignInNavigator>,
    /// Set once the global sign-out has fired.
    signed_out: AtomicBool,
}

impl ApiGateway {
    /// Build a gateway from configuration.
    pub fn new(
        api: &ApiConfig,
        session: &SessionConfig,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn SignInNavigator>,
    ) -> AppResult<Self> {
        Url::parse(&api.base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API base URL: {}", api.base_url),
                e,
            )
        })?;

        let http = reqwest::Client::builder()
            .timeout(api.timeout())
            .user_agent(api.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            token_key: session.token_key.clone(),
            storage,
            navigator,
            signed_out: AtomicBool::new(false),
        })
    }

    /// The durable storage the gateway reads its credential from.
    pub fn storage(&self) -> &Arc<dyn DurableStorage> {
        &self.storage
    }

    /// Re-arm the one-shot sign-out after a new session is established.
    pub fn rearm_sign_out(&self) {
        self.signed_out.store(false, Ordering::SeqCst);
    }

    /// Whether the global sign-out has fired since the last re-arm.
    pub fn has_signed_out(&self) -> bool {
        self.signed_out.load(Ordering::SeqCst)
    }

    /// `GET` a resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryParams) -> AppResult<T> {
        self.request::<T, ()>(Method::GET, path, query, None).await
    }

    /// `POST` a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, &QueryParams::new(), Some(body)).await
    }

    /// `PATCH` a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, &QueryParams::new(), Some(body)).await
    }

    /// `DELETE` a resource, discarding any response body.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.request::<Value, ()>(Method::DELETE, path, &QueryParams::new(), None)
            .await
            .map(|_| ())
    }

    /// Issue a request and deserialize the unwrapped payload.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<&B>,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self.execute(method, path, query, body).await?;
        unwrap_payload(raw)
    }

    /// Issue a request and return the raw, still-enveloped response body.
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<&B>,
    ) -> AppResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        let authenticated = match self.bearer_token() {
            Some(token) => {
                request = request.bearer_auth(token);
                true
            }
            None => false,
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, path, authenticated, "Sending request");
        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "Request failed before a response");
            AppError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        let parsed = parse_body(&text);
        debug!(%method, path, status = status.as_u16(), "Received response");

        if status.is_success() {
            return parsed.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Unexpected response from server for {path}"),
                    e,
                )
            });
        }

        let body = parsed.unwrap_or(Value::Null);
        if status == StatusCode::UNAUTHORIZED && !is_invalid_credentials(&body) {
            self.force_sign_out();
        }

        let message = backend_message(&body).unwrap_or_else(|| fallback_message(status));
        warn!(%method, path, status = status.as_u16(), %message, "Request rejected");
        Err(AppError::from_status(status.as_u16(), message))
    }

    fn url(&self, path: &str, query: &QueryParams) -> AppResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Invalid request URL: {raw}"), e)
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn bearer_token(&self) -> Option<String> {
        match self.storage.get(&self.token_key) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not read bearer credential; sending unauthenticated");
                None
            }
        }
    }

    fn force_sign_out(&self) {
        if self.signed_out.swap(true, Ordering::SeqCst) {
            debug!("Global sign-out already performed");
            return;
        }
        warn!("Session rejected by backend; clearing storage and returning to sign-in");
        if let Err(e) = self.storage.clear() {
            error!(error = %e, "Failed to clear durable storage during sign-out");
        }
        self.navigator.redirect_to_sign_in();
    }
}

fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(text)
    }
}

fn is_invalid_credentials(body: &Value) -> bool {
    [body.pointer("/error/message"), body.get("message")]
        .into_iter()
        .flatten()
        .any(|m| m.as_str() == Some(INVALID_CREDENTIALS))
}

fn fallback_message(status: StatusCode) -> String {
    match status.as_u16() {
        401 => "Your session has expired. Please sign in again.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        s if s >= 500 => "The server encountered an error. Please try again later.".to_string(),
        s => format!("Request failed with status {s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::storage::MemoryStorage;

    #[derive(Debug, Default)]
    struct NoopNavigator;

    impl SignInNavigator for NoopNavigator {
        fn redirect_to_sign_in(&self) {}
    }

    fn gateway(base_url: &str) -> ApiGateway {
        let api = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        ApiGateway::new(
            &api,
            &SessionConfig::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(NoopNavigator),
        )
        .unwrap()
    }

    #[test]
    fn test_url_joining_and_query_encoding() {
        let gw = gateway("https://api.example.com/api/");
        let query = QueryParams::new()
            .with("page", 1)
            .with("entityName", "St. Mary & Co")
            .with("search", "");
        let url = gw.url("/activity-logs", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/activity-logs?page=1&entityName=St.+Mary+%26+Co"
        );
        assert_eq!(gw.url("users/me", &QueryParams::new()).unwrap().as_str(), "https://api.example.com/api/users/me");
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let api = ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        };
        let err = ApiGateway::new(
            &api,
            &SessionConfig::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(NoopNavigator),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_invalid_credentials_detection() {
        assert!(is_invalid_credentials(&json!({"message": "Invalid credentials"})));
        assert!(is_invalid_credentials(&json!({"error": {"message": "Invalid credentials"}})));
        assert!(!is_invalid_credentials(&json!({"message": "Token expired"})));
        assert!(!is_invalid_credentials(&Value::Null));
    }

    #[test]
    fn test_guard_fires_once_until_rearmed() {
        let gw = gateway("https://api.example.com/api");
        assert!(!gw.has_signed_out());
        gw.force_sign_out();
        gw.force_sign_out();
        assert!(gw.has_signed_out());
        gw.rearm_sign_out();
        assert!(!gw.has_signed_out());
    }

    #[test]
    fn test_empty_body_parses_as_null() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert_eq!(parse_body("  ").unwrap(), Value::Null);
        assert!(parse_body("<html>").is_err());
    }
}

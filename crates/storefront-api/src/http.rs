//! # HTTP Transport
//!
//! The single place where requests are built, sent and decoded.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HttpClient::send                                 │
//! │                                                                         │
//! │  base_url + path + query ──► reqwest (timeout) ──► X-User-ID: <token>   │
//! │                                      │                                  │
//! │            ┌─────────────────────────┼──────────────────────────┐       │
//! │            ▼                         ▼                          ▼       │
//! │     no response              non-2xx status                   2xx       │
//! │  Transport / Timeout     Status{status, message}     adopt X-User-ID    │
//! │            │                         │              decode Envelope<T>  │
//! │            │                         │                 │          │     │
//! │            │                         │          success:true  success:false
//! │            │                         │              Ok(data)   Business │
//! │            └───────────┬─────────────┴─────────────────────────┘        │
//! │                        ▼                                                │
//! │            FailureObserver::on_failure(endpoint, &err)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use storefront_core::envelope::sequence_or_empty;
use storefront_core::Envelope;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::identity::IdentityStore;
use crate::observer::{FailureObserver, NoOpObserver};

/// Query string pairs. Only present parameters are included.
pub type Query = Vec<(&'static str, String)>;

// =============================================================================
// Client
// =============================================================================

/// Shared REST transport.
pub struct HttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    identity: Arc<IdentityStore>,
    identity_header: HeaderName,
    observer: Arc<dyn FailureObserver>,
}

impl HttpClient {
    /// Builds a client from configuration.
    pub fn new(config: &ApiConfig, identity: Arc<IdentityStore>) -> ApiResult<Self> {
        config.validate()?;
        Self::with_base_url(config.base_url(), config.timeout(), identity)?
            .with_identity_header(&config.identity.header)
    }

    /// Builds a client against an explicit base URL with the default
    /// `X-User-ID` identity header.
    pub fn with_base_url(
        base_url: &str,
        timeout: Duration,
        identity: Arc<IdentityStore>,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(HttpClient {
            client,
            base_url: normalize_base_url(base_url)?,
            timeout,
            identity,
            identity_header: HeaderName::from_static("x-user-id"),
            observer: Arc::new(NoOpObserver),
        })
    }

    /// Sets the header used to carry the identity token.
    pub fn with_identity_header(mut self, header: &str) -> ApiResult<Self> {
        self.identity_header = HeaderName::from_bytes(header.trim().as_bytes())
            .map_err(|e| ApiError::Config(format!("invalid identity header {:?}: {}", header, e)))?;
        Ok(self)
    }

    /// Sets the observer notified of every failed request.
    pub fn with_observer(mut self, observer: Arc<dyn FailureObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The identity store this client reads and updates.
    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    // =========================================================================
    // Envelope Helpers
    // =========================================================================

    /// `GET` returning `data`, or `T::default()` when `data` is null.
    pub async fn get_data<T>(&self, path: &str, query: Query) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let endpoint = endpoint(&Method::GET, path);
        let result = self
            .envelope::<T>(Method::GET, path, query, None)
            .await
            .and_then(|env| env.into_data().map_err(ApiError::from));
        self.report(&endpoint, result)
    }

    /// `GET` returning `data`, which must be present.
    pub async fn get_required<T>(&self, path: &str, query: Query) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let endpoint = endpoint(&Method::GET, path);
        let result = self
            .envelope::<T>(Method::GET, path, query, None)
            .await
            .and_then(|env| env.into_required().map_err(ApiError::from));
        self.report(&endpoint, result)
    }

    /// `GET` returning `data` as a list. A payload that is not a JSON array
    /// yields an empty list; an array whose elements do not decode fails.
    pub async fn get_sequence<T>(&self, path: &str, query: Query) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let endpoint = endpoint(&Method::GET, path);
        let result = self
            .envelope::<Value>(Method::GET, path, query, None)
            .await
            .and_then(|env| env.into_data().map_err(ApiError::from))
            .and_then(|data| sequence_or_empty(data).map_err(ApiError::from));
        self.report(&endpoint, result)
    }

    /// Sends a mutation and checks the envelope, discarding `data`.
    ///
    /// A 2xx response with an empty body counts as success.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let endpoint = endpoint(&method, path);
        let body = match body.map(serde_json::to_value).transpose() {
            Ok(body) => body,
            Err(e) => return self.report(&endpoint, Err(e.into())),
        };
        let result = match self.send(method, path, Query::new(), body).await {
            Ok(text) if text.trim().is_empty() => Ok(()),
            Ok(text) => decode::<Value>(&text)
                .and_then(|env| env.into_unit().map_err(ApiError::from)),
            Err(e) => Err(e),
        };
        self.report(&endpoint, result)
    }

    async fn envelope<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Value>,
    ) -> ApiResult<Envelope<T>> {
        let text = self.send(method, path, query, body).await?;
        decode(&text)
    }

    fn report<T>(&self, endpoint: &str, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(err) = &result {
            warn!(endpoint = %endpoint, error = %err, "Request failed");
            self.observer.on_failure(endpoint, err);
        }
        result
    }

    // =========================================================================
    // Raw Transport
    // =========================================================================

    /// Sends one request and returns the 2xx body text.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Value>,
    ) -> ApiResult<String> {
        let url = self.url(path, &query)?;
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        let token = self.identity.current();
        match HeaderValue::from_str(&token) {
            Ok(value) => request = request.header(self.identity_header.clone(), value),
            Err(_) => warn!(token = %token, "Identity token is not a valid header value"),
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        let headers = response.headers().clone();

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(method = %method, url = %url, status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        // only successful responses may hand out a new identity
        self.adopt_identity(&headers);
        Ok(text)
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> ApiResult<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn adopt_identity(&self, headers: &reqwest::header::HeaderMap) {
        let Some(token) = headers
            .get(&self.identity_header)
            .and_then(|v| v.to_str().ok())
        else {
            return;
        };
        if let Err(e) = self.identity.replace(token) {
            warn!(error = %e, "Failed to persist server-issued identity");
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parses the base URL and guarantees a trailing slash so relative joins
/// keep the `/api` prefix.
fn normalize_base_url(base_url: &str) -> ApiResult<Url> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{} cannot be a base URL", base_url)));
    }
    Ok(url)
}

fn endpoint(method: &Method, path: &str) -> String {
    format!("{} {}", method, path)
}

fn decode<T: DeserializeOwned>(text: &str) -> ApiResult<Envelope<T>> {
    Ok(serde_json::from_str(text)?)
}

/// Extracts `message` (or `error`) from an error body, if it is JSON.
fn error_message(text: &str) -> Option<String> {
    let body: Value = serde_json::from_str(text).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

//! Client configuration, the error type, and the transport core.
//!
//! Every public operation on [`Client`] funnels through the three request
//! shapes here: plain GET, JSON POST, and multipart POST. The transport
//! classifies HTTP status codes into [`ClientError`] values and
//! content-negotiates successful bodies, so the per-endpoint modules only
//! deal with typed requests and responses.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::http::{add_common_headers, build_http_client};
use crate::options::SafetyOptions;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.guardrail.ai";

/// Errors that can occur during client operations.
///
/// The `Display` string of each variant is the message callers see; the
/// variants themselves exist so the transport can classify outcomes, not
/// as a public taxonomy. [`ClientError::Eof`] is the one non-failure
/// variant: it signals clean termination of a streaming call and must be
/// special-cased by streaming callers (see [`ClientError::is_eof`]).
#[derive(Error, Debug)]
pub enum ClientError {
    /// A mandatory field was missing or empty. Raised before any network
    /// call is made.
    #[error("{0}")]
    Validation(String),

    /// HTTP 404.
    #[error("url not found")]
    NotFound,

    /// HTTP 401 or 403. Both statuses collapse into this one class.
    #[error("api understands the request but refuses to authorize it")]
    Unauthorized,

    /// HTTP 503.
    #[error("service unavailable")]
    ServiceUnavailable,

    /// Any other non-200 status; carries the remote error body verbatim.
    #[error("{0}")]
    Remote(String),

    /// Network-level failure (DNS, timeout, connection reset).
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// Local file access failure (upload sources, file-backed images).
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Clean end-of-stream signal delivered through a streaming callback.
    #[error("EOF")]
    Eof,
}

impl ClientError {
    /// Whether this is the end-of-stream sentinel rather than a failure.
    pub fn is_eof(&self) -> bool {
        matches!(self, ClientError::Eof)
    }
}

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Immutable client configuration.
///
/// # Example
/// ```rust
/// use guardrail::client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("your-api-key")
///     .with_base_url("https://api.example.com".to_string())
///     .with_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer token on every call.
    pub api_key: SecretString,

    /// Base URL for API endpoints.
    pub base_url: String,

    /// Request timeout; reqwest defaults apply when unset.
    pub timeout: Option<Duration>,

    /// HTTP proxy URL.
    pub proxy: Option<String>,

    /// Additional HTTP headers to include in requests.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl ClientConfig {
    /// Create a new configuration with an API key and the default base URL.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: None,
            proxy: None,
            extra_headers: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set extra headers.
    pub fn with_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}

/// API client.
///
/// Holds only immutable configuration; concurrent calls on one client (or
/// clones of it) are safe without locking. No connection is kept between
/// calls.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client with an API key and default configuration.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Create a client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Create a client from environment variables.
    ///
    /// Expects:
    /// - `GUARDRAIL_API_KEY`: API key (required)
    /// - `GUARDRAIL_BASE_URL`: base URL override (optional)
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = std::env::var("GUARDRAIL_API_KEY")
            .map_err(|_| ClientError::Validation("GUARDRAIL_API_KEY not set".to_string()))?;

        let mut config = ClientConfig::new(api_key);
        if let Ok(base_url) = std::env::var("GUARDRAIL_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        Ok(Self::from_config(config))
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Service health check: a plain GET on the base URL returning the
    /// service's status line.
    pub async fn health(&self) -> Result<String, ClientError> {
        let http_client = build_http_client(&self.config)?;
        let req = add_common_headers(http_client.get(&self.config.base_url), &self.config);
        Ok(execute(req).await?.into_text())
    }

    /// Issue a JSON POST and decode the response into `T`.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let http_client = build_http_client(&self.config)?;
        let req = add_common_headers(http_client.post(self.endpoint(path)), &self.config)
            .header(CONTENT_TYPE, "application/json")
            .json(body);

        execute(req).await?.decode()
    }

    /// Issue a JSON POST and hand back the raw response for SSE
    /// consumption. A non-200 status is classified here, before any event
    /// is read.
    pub(crate) async fn post_stream<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        let http_client = build_http_client(&self.config)?;
        let req = add_common_headers(http_client.post(self.endpoint(path)), &self.config)
            .header(CONTENT_TYPE, "application/json")
            .json(body);

        let response = req.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let raw = response.bytes().await.unwrap_or_default();
            debug!(%status, path, "streaming request rejected");
            return Err(classify_status(status, &raw));
        }

        Ok(response)
    }

    /// Issue a multipart POST. Safety options ride as request headers, not
    /// form fields; that split is part of the wire contract.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        safety: &SafetyOptions,
    ) -> Result<T, ClientError> {
        let http_client = build_http_client(&self.config)?;
        let mut req = add_common_headers(http_client.post(self.endpoint(path)), &self.config);
        req = safety.apply_headers(req);

        execute(req.multipart(form)).await?.decode()
    }
}

/// A successful response body, split by declared content type.
pub(crate) enum Payload {
    Json(bytes::Bytes),
    Text(String),
}

impl Payload {
    /// Decode into a typed value. A body the server labelled as text still
    /// gets one JSON parse attempt; a failure surfaces as a parse error,
    /// never as an empty value.
    pub(crate) fn decode<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        match self {
            Payload::Json(raw) => Ok(serde_json::from_slice(&raw)?),
            Payload::Text(text) => Ok(serde_json::from_str(&text)?),
        }
    }

    pub(crate) fn into_text(self) -> String {
        match self {
            Payload::Json(raw) => String::from_utf8_lossy(&raw).into_owned(),
            Payload::Text(text) => text,
        }
    }
}

/// Send a built request, classify the status, and content-negotiate the
/// body. `text/plain` and unrecognized content types both decode as raw
/// text.
pub(crate) async fn execute(request: reqwest::RequestBuilder) -> Result<Payload, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);

    let raw = response.bytes().await?;

    if status != StatusCode::OK {
        debug!(%status, "request rejected");
        return Err(classify_status(status, &raw));
    }

    if is_json {
        Ok(Payload::Json(raw))
    } else {
        Ok(Payload::Text(String::from_utf8_lossy(&raw).into_owned()))
    }
}

/// Map a non-200 status to its error. 404, 401/403, and 503 have fixed
/// messages independent of the body; everything else passes the remote
/// error envelope through verbatim.
pub(crate) fn classify_status(status: StatusCode, body: &[u8]) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
        StatusCode::SERVICE_UNAVAILABLE => ClientError::ServiceUnavailable,
        _ => {
            if let Ok(envelope) = serde_json::from_slice::<RemoteErrorEnvelope>(body) {
                ClientError::Remote(envelope.error)
            } else {
                ClientError::Remote(String::from_utf8_lossy(body).into_owned())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RemoteErrorEnvelope {
    error: String,
}

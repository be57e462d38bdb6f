// HTTP transport for the Nessus facade
//
// Builds the URL, attaches auth headers, enforces a timeout and maps every
// non-success outcome to a typed GatewayError.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use super::retry::{with_retry, RetryPolicy};
use crate::config::BackendConfig;
use crate::errors::GatewayError;

/// Error bodies longer than this are cut
pub const MAX_ERROR_BODY_CHARS: usize = 500;

pub const COOKIE_HEADER: &str = "x-cookie";
pub const API_KEYS_HEADER: &str = "x-apikeys";

/// Pick the auth header for the current credentials
///
/// Session token first, then the access/secret key pair, otherwise nothing.
pub fn auth_header(config: &BackendConfig) -> Option<(&'static str, String)> {
    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        return Some((COOKIE_HEADER, format!("token={};", token)));
    }

    match (config.access_key.as_deref(), config.secret_key.as_deref()) {
        (Some(access), Some(secret)) if !access.is_empty() && !secret.is_empty() => Some((
            API_KEYS_HEADER,
            format!("accessKey={}; secretKey={};", access, secret),
        )),
        _ => None,
    }
}

/// Cut an error body to `MAX_ERROR_BODY_CHARS` characters
pub fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// A single call against the facade
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub expect_body: bool,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(Method::POST, path);
        request.body = Some(body);
        request
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            expect_body: true,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Do not parse the response body
    pub fn without_body(mut self) -> Self {
        self.expect_body = false;
        self
    }
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    config: RwLock<BackendConfig>,
}

impl HttpTransport {
    pub fn new(config: BackendConfig) -> Result<Self, GatewayError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nessus-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            retry: RetryPolicy::new(config.max_retries),
            config: RwLock::new(config),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cache a session token; later requests prefer it over API keys
    pub async fn set_token(&self, token: String) {
        self.config.write().await.token = Some(token);
    }

    /// Snapshot of the current connection configuration
    pub async fn config(&self) -> BackendConfig {
        self.config.read().await.clone()
    }

    /// Send a request; GETs are retried on network failure
    pub async fn send(&self, request: &ApiRequest) -> Result<Option<Value>, GatewayError> {
        if request.method == Method::GET {
            with_retry(&self.retry, || self.send_once(request)).await
        } else {
            self.send_once(request).await
        }
    }

    async fn build_headers(&self, request: &ApiRequest) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GatewayError::validation(format!("invalid header name: {}", e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| GatewayError::validation(format!("invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        // Inserted last so caller headers of the same name cannot replace them
        let auth = auth_header(&*self.config.read().await);
        if let Some((name, value)) = auth {
            let value = HeaderValue::from_str(&value).map_err(|e| {
                GatewayError::Unknown(format!("credentials are not a valid header value: {}", e))
            })?;
            headers.insert(HeaderName::from_static(name), value);
        }

        Ok(headers)
    }

    async fn send_once(&self, request: &ApiRequest) -> Result<Option<Value>, GatewayError> {
        let url = format!("{}{}", self.base_url, request.path);
        let headers = self.build_headers(request).await?;

        debug!(method = %request.method, url = %url, "Sending facade request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.network_error(request, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), path = %request.path, "Facade returned error status");
            return Err(GatewayError::http_status(status.as_u16(), truncate_body(&body)));
        }

        if !request.expect_body || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let value = response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                self.network_error(request, &e)
            } else {
                GatewayError::Unknown(format!("Invalid JSON from {}: {}", request.path, e))
            }
        })?;

        Ok(Some(value))
    }

    fn network_error(&self, request: &ApiRequest, err: &reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::network(format!(
                "{} {} timed out after {}s",
                request.method,
                request.path,
                self.timeout.as_secs()
            ))
        } else {
            GatewayError::network(format!("{} {} failed: {}", request.method, request.path, err))
        }
    }
}

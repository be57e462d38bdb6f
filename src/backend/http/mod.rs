// HTTP backend - fulfils each operation against the Nessus facade
//
// Responses are reshaped where needed so callers get the same structure the
// mock backend produces.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::backend::types::{
    ApiStatus, ScanId, ScanList, ScanTemplate, StartScanRequest, TemplateList, Vulnerability,
};
use crate::backend::ScanBackend;
use crate::config::{BackendConfig, BackendMode, LoginCredentials};
use crate::errors::{user_message, GatewayError};

pub mod retry;
pub mod transport;

pub use retry::{with_retry, RetryPolicy};
pub use transport::{
    auth_header, truncate_body, ApiRequest, HttpTransport, MAX_ERROR_BODY_CHARS,
};

pub struct HttpBackend {
    transport: HttpTransport,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.transport = self.transport.with_retry_policy(retry);
        self
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    async fn fetch_value(&self, request: ApiRequest) -> Result<Value, GatewayError> {
        let request = request.header("accept", "application/json");
        Ok(self.transport.send(&request).await?.unwrap_or(Value::Null))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, GatewayError> {
        let path = request.path.clone();
        let value = self.fetch_value(request).await?;
        serde_json::from_value(value)
            .map_err(|e| GatewayError::Unknown(format!("Unexpected response from {}: {}", path, e)))
    }
}

/// Accept a bare template array or an already wrapped `{templates: [...]}`
pub fn normalize_templates(value: Value) -> Result<TemplateList, GatewayError> {
    let templates = match value {
        Value::Object(mut map) => map.remove("templates").unwrap_or(Value::Array(Vec::new())),
        Value::Null => Value::Array(Vec::new()),
        other => other,
    };

    let templates: Vec<ScanTemplate> = serde_json::from_value(templates).map_err(|e| {
        GatewayError::Unknown(format!("Unexpected response from /list_scan_templates: {}", e))
    })?;

    Ok(TemplateList { templates })
}

/// Accept a bare scan array or an already wrapped `{scans: [...]}`
pub fn normalize_scans(value: Value) -> Result<ScanList, GatewayError> {
    let scans = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("scans") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(GatewayError::Unknown(format!(
                    "Unexpected scans field from /list_scans: {}",
                    other
                )))
            }
        },
        Value::Null => Vec::new(),
        other => {
            return Err(GatewayError::Unknown(format!(
                "Unexpected response from /list_scans: {}",
                other
            )))
        }
    };

    Ok(ScanList { scans })
}

/// `folder_id` 0 means no folder and is left off the query
fn list_scans_request(folder_id: Option<u64>) -> ApiRequest {
    let request = ApiRequest::get("/list_scans");
    match folder_id.filter(|id| *id != 0) {
        Some(folder_id) => request.query("folder_id", folder_id),
        None => request,
    }
}

fn extract_token(value: Value) -> Result<String, GatewayError> {
    let token = match value {
        Value::String(token) => token,
        Value::Object(map) => map
            .get("token")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    };

    if token.is_empty() {
        return Err(GatewayError::Unknown(
            "Facade returned no session token".to_string(),
        ));
    }
    Ok(token)
}

#[async_trait]
impl ScanBackend for HttpBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Real
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<(), GatewayError> {
        let request = ApiRequest::post(
            "/session",
            json!({
                "username": credentials.username,
                "password": credentials.password,
            }),
        );
        let token = extract_token(self.fetch_value(request).await?)?;
        self.transport.set_token(token).await;
        info!(username = %credentials.username, "Logged in to Nessus facade");
        Ok(())
    }

    async fn list_scan_templates(&self) -> Result<TemplateList, GatewayError> {
        normalize_templates(self.fetch_value(ApiRequest::get("/list_scan_templates")).await?)
    }

    async fn start_scan(&self, request: &StartScanRequest) -> Result<Value, GatewayError> {
        let body =
            serde_json::to_value(request).map_err(|e| GatewayError::Unknown(e.to_string()))?;
        self.fetch_value(ApiRequest::post("/start_scan", body)).await
    }

    async fn get_scan_status(&self, scan_id: &ScanId) -> Result<Value, GatewayError> {
        self.fetch_value(ApiRequest::get("/scan_status").query("scan_id", scan_id))
            .await
    }

    async fn get_scan_results(&self, scan_id: &ScanId) -> Result<Value, GatewayError> {
        self.fetch_value(ApiRequest::get("/scan_results").query("scan_id", scan_id))
            .await
    }

    async fn list_scans(&self, folder_id: Option<u64>) -> Result<ScanList, GatewayError> {
        normalize_scans(self.fetch_value(list_scans_request(folder_id)).await?)
    }

    async fn list_folders(&self) -> Result<Value, GatewayError> {
        self.fetch_value(ApiRequest::get("/folders")).await
    }

    async fn ensure_folder(&self, name: &str) -> Result<u64, GatewayError> {
        self.fetch(
            ApiRequest::get("/folders/getid")
                .query("name", name)
                .query("create_if_not_exists", true),
        )
        .await
    }

    async fn get_vulnerability_details(
        &self,
        _vulnerability_id: &str,
    ) -> Result<Vulnerability, GatewayError> {
        Err(GatewayError::NotImplemented(
            "vulnerability details are not available from the Nessus facade".to_string(),
        ))
    }

    async fn check_api_status(&self) -> ApiStatus {
        // Only the status matters here, so the body is never parsed
        let request = ApiRequest::get("/list_scan_templates")
            .header("accept", "application/json")
            .without_body();
        match self.transport.send(&request).await {
            Ok(_) => ApiStatus::ok(BackendMode::Real),
            Err(err) => {
                warn!("Facade health check failed: {}", err);
                ApiStatus::error(BackendMode::Real, user_message(&err))
            }
        }
    }
}

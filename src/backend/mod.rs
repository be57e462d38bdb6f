// Dual-mode backend client
//
// One trait method per domain action, with two implementations: an in-memory
// mock store and the HTTP facade. The implementation is chosen once when the
// client is constructed and never re-inspected per call.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::config::{BackendConfig, BackendMode, LoginCredentials};
use crate::errors::GatewayError;

pub mod http;
pub mod mock;
pub mod types;

pub use http::HttpBackend;
pub use mock::MockBackend;
pub use types::{
    ApiStatus, ScanId, ScanList, ScanTemplate, StartScanRequest, TemplateList, Vulnerability,
    DEFAULT_SCAN_NAME_PREFIX,
};

/// Backend adapter interface
///
/// Every method may suspend on network I/O in real mode. Failures are typed
/// so the dispatcher can classify them without inspecting strings.
#[async_trait]
pub trait ScanBackend: Send + Sync {
    /// Mode served by this adapter
    fn mode(&self) -> BackendMode;

    /// Exchange credentials for a session token (no-op in mock mode)
    async fn login(&self, credentials: &LoginCredentials) -> Result<(), GatewayError>;

    async fn list_scan_templates(&self) -> Result<TemplateList, GatewayError>;

    async fn start_scan(&self, request: &StartScanRequest) -> Result<Value, GatewayError>;

    async fn get_scan_status(&self, scan_id: &ScanId) -> Result<Value, GatewayError>;

    async fn get_scan_results(&self, scan_id: &ScanId) -> Result<Value, GatewayError>;

    async fn list_scans(&self, folder_id: Option<u64>) -> Result<ScanList, GatewayError>;

    /// Real mode only
    async fn list_folders(&self) -> Result<Value, GatewayError>;

    /// Real mode only; returns the folder id, creating the folder if needed
    async fn ensure_folder(&self, name: &str) -> Result<u64, GatewayError>;

    /// Mock mode only; the facade has no such endpoint
    async fn get_vulnerability_details(
        &self,
        vulnerability_id: &str,
    ) -> Result<Vulnerability, GatewayError>;

    /// Health report that never fails
    async fn check_api_status(&self) -> ApiStatus;
}

/// Backend client handed to the tools
///
/// Cloning is cheap; clones share the same adapter (and mock store).
#[derive(Clone)]
pub struct BackendClient {
    backend: Arc<dyn ScanBackend>,
}

impl BackendClient {
    /// Build the adapter selected by `config.use_mock`
    pub fn new(config: BackendConfig) -> Result<Self, GatewayError> {
        let backend: Arc<dyn ScanBackend> = if config.use_mock {
            info!("Backend client using mock data store");
            Arc::new(MockBackend::new())
        } else {
            info!(base_url = %config.base_url, "Backend client using Nessus facade");
            Arc::new(HttpBackend::new(config)?)
        };

        Ok(Self { backend })
    }

    /// Wrap an existing adapter
    pub fn from_backend(backend: Arc<dyn ScanBackend>) -> Self {
        Self { backend }
    }

    pub fn mode(&self) -> BackendMode {
        self.backend.mode()
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), GatewayError> {
        self.backend.login(credentials).await
    }

    pub async fn list_scan_templates(&self) -> Result<TemplateList, GatewayError> {
        self.backend.list_scan_templates().await
    }

    /// Start a scan; `target` and `scan_type` must be non-empty
    pub async fn start_scan(
        &self,
        target: &str,
        scan_type: &str,
        scan_name_prefix: Option<&str>,
    ) -> Result<Value, GatewayError> {
        let request =
            StartScanRequest::new(target, scan_type, scan_name_prefix.map(str::to_string))?;
        self.backend.start_scan(&request).await
    }

    pub async fn get_scan_status(&self, scan_id: &ScanId) -> Result<Value, GatewayError> {
        self.backend.get_scan_status(scan_id).await
    }

    pub async fn get_scan_results(&self, scan_id: &ScanId) -> Result<Value, GatewayError> {
        self.backend.get_scan_results(scan_id).await
    }

    pub async fn list_scans(&self, folder_id: Option<u64>) -> Result<ScanList, GatewayError> {
        self.backend.list_scans(folder_id).await
    }

    pub async fn list_folders(&self) -> Result<Value, GatewayError> {
        self.backend.list_folders().await
    }

    pub async fn ensure_folder(&self, name: &str) -> Result<u64, GatewayError> {
        if name.is_empty() {
            return Err(GatewayError::validation("folder name must not be empty"));
        }
        self.backend.ensure_folder(name).await
    }

    pub async fn get_vulnerability_details(
        &self,
        vulnerability_id: &str,
    ) -> Result<Vulnerability, GatewayError> {
        self.backend.get_vulnerability_details(vulnerability_id).await
    }

    pub async fn check_api_status(&self) -> ApiStatus {
        self.backend.check_api_status().await
    }
}

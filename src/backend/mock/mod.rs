// Mock backend - serves every operation from memory, no I/O

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::backend::types::{
    ApiStatus, ScanId, ScanList, StartScanRequest, TemplateList, Vulnerability,
};
use crate::backend::ScanBackend;
use crate::config::{BackendMode, LoginCredentials};
use crate::errors::GatewayError;

pub mod catalog;
pub mod store;

pub use store::{MockStore, ScanRecord, ScanStatus};

pub struct MockBackend {
    store: MockStore,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            store: MockStore::new(),
        }
    }

    pub fn store(&self) -> &MockStore {
        &self.store
    }

    fn record_id(scan_id: &ScanId) -> Result<u64, GatewayError> {
        scan_id
            .as_u64()
            .ok_or_else(|| GatewayError::not_found(format!("Scan {}", scan_id)))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn scan_results(record: &ScanRecord) -> Value {
    let findings: Vec<&Vulnerability> = if record.status == ScanStatus::Completed {
        catalog::VULNERABILITIES.iter().collect()
    } else {
        Vec::new()
    };

    let count = |severity: &str| findings.iter().filter(|v| v.severity == severity).count();

    let hosts = if findings.is_empty() {
        Vec::new()
    } else {
        vec![json!({
            "host_id": 1,
            "hostname": record.target,
            "critical": count("critical"),
            "high": count("high"),
            "medium": count("medium"),
            "low": count("low"),
            "info": 0,
        })]
    };

    let vulnerabilities: Vec<Value> = findings
        .iter()
        .map(|v| {
            json!({
                "id": v.id,
                "plugin_name": v.name,
                "severity": v.severity,
                "cvss_score": v.cvss_score,
            })
        })
        .collect();

    json!({
        "scan_id": record.id,
        "name": record.name,
        "target": record.target,
        "status": record.status,
        "hosts": hosts,
        "vulnerabilities": vulnerabilities,
    })
}

#[async_trait]
impl ScanBackend for MockBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Mock
    }

    async fn login(&self, _credentials: &LoginCredentials) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_scan_templates(&self) -> Result<TemplateList, GatewayError> {
        Ok(TemplateList {
            templates: catalog::templates(),
        })
    }

    async fn start_scan(&self, request: &StartScanRequest) -> Result<Value, GatewayError> {
        let record = self
            .store
            .insert_scan(&request.target, &request.scan_type, &request.scan_name_prefix)
            .await;
        debug!(scan_id = record.id, target = %record.target, "Created mock scan");

        Ok(json!({
            "ok": true,
            "scan_id": record.id,
            "scan_name": record.name,
        }))
    }

    async fn get_scan_status(&self, scan_id: &ScanId) -> Result<Value, GatewayError> {
        let id = Self::record_id(scan_id)?;
        let record = self
            .store
            .advance_status(id)
            .await
            .ok_or_else(|| GatewayError::not_found(format!("Scan {}", scan_id)))?;

        serde_json::to_value(&record).map_err(|e| GatewayError::Unknown(e.to_string()))
    }

    async fn get_scan_results(&self, scan_id: &ScanId) -> Result<Value, GatewayError> {
        let id = Self::record_id(scan_id)?;
        let record = self
            .store
            .get(id)
            .await
            .ok_or_else(|| GatewayError::not_found(format!("Scan {}", scan_id)))?;

        Ok(scan_results(&record))
    }

    async fn list_scans(&self, _folder_id: Option<u64>) -> Result<ScanList, GatewayError> {
        let scans = self
            .store
            .list()
            .await
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GatewayError::Unknown(e.to_string()))?;

        Ok(ScanList { scans })
    }

    async fn list_folders(&self) -> Result<Value, GatewayError> {
        Err(GatewayError::NotSupported(
            "folders are not available in mock mode".to_string(),
        ))
    }

    async fn ensure_folder(&self, _name: &str) -> Result<u64, GatewayError> {
        Err(GatewayError::NotSupported(
            "folders are not available in mock mode".to_string(),
        ))
    }

    async fn get_vulnerability_details(
        &self,
        vulnerability_id: &str,
    ) -> Result<Vulnerability, GatewayError> {
        catalog::find_vulnerability(vulnerability_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("Vulnerability {}", vulnerability_id)))
    }

    async fn check_api_status(&self) -> ApiStatus {
        ApiStatus::ok(BackendMode::Mock)
    }
}

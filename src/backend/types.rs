// Domain types shared by both backend adapters
//
// Both modes hand the same structural shapes to the layers above.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::config::BackendMode;
use crate::errors::GatewayError;

/// Scan name prefix used when the caller gives none
pub const DEFAULT_SCAN_NAME_PREFIX: &str = "nessus-controller";

/// Scan identifier, accepted as an integer or a non-empty string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanId {
    Numeric(u64),
    Text(String),
}

impl ScanId {
    /// Coerce a raw tool argument
    pub fn from_value(value: &Value) -> Result<Self, GatewayError> {
        match value {
            Value::Number(n) => n.as_u64().map(ScanId::Numeric).ok_or_else(|| {
                GatewayError::validation(format!(
                    "scan_id must be a non-negative integer, got {}",
                    n
                ))
            }),
            Value::String(s) if !s.is_empty() => Ok(ScanId::Text(s.clone())),
            Value::String(_) => Err(GatewayError::validation("scan_id must not be empty")),
            Value::Null => Err(GatewayError::validation("scan_id is required")),
            other => Err(GatewayError::validation(format!(
                "scan_id must be a number or string, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// Numeric form, when the id is (or parses as) an integer
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ScanId::Numeric(n) => Some(*n),
            ScanId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanId::Numeric(n) => write!(f, "{}", n),
            ScanId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ScanId {
    fn from(id: u64) -> Self {
        ScanId::Numeric(id)
    }
}

impl From<&str> for ScanId {
    fn from(id: &str) -> Self {
        ScanId::Text(id.to_string())
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Nessus scan template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTemplate {
    pub title: String,
    pub uuid: String,
    #[serde(default)]
    pub desc: String,
}

/// Template listing, identical in both modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateList {
    pub templates: Vec<ScanTemplate>,
}

/// Scan listing, identical in both modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanList {
    pub scans: Vec<Value>,
}

/// Arguments for starting a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartScanRequest {
    pub target: String,
    pub scan_type: String,
    pub scan_name_prefix: String,
}

impl StartScanRequest {
    /// Build a request; target and scan type must be non-empty
    pub fn new(
        target: impl Into<String>,
        scan_type: impl Into<String>,
        scan_name_prefix: Option<String>,
    ) -> Result<Self, GatewayError> {
        let target = target.into();
        let scan_type = scan_type.into();

        if target.is_empty() {
            return Err(GatewayError::validation("target must not be empty"));
        }
        if scan_type.is_empty() {
            return Err(GatewayError::validation("scan_type must not be empty"));
        }

        Ok(Self {
            target,
            scan_type,
            scan_name_prefix: scan_name_prefix
                .filter(|prefix| !prefix.is_empty())
                .unwrap_or_else(|| DEFAULT_SCAN_NAME_PREFIX.to_string()),
        })
    }
}

/// Health report; never an error value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    pub mode: BackendMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn ok(mode: BackendMode) -> Self {
        Self {
            status: "ok".to_string(),
            mode,
            message: None,
        }
    }

    pub fn error(mode: BackendMode, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            mode,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Vulnerability catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vulnerability {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: &'static str,
    pub cvss_score: f32,
    pub description: &'static str,
    pub solution: &'static str,
    pub affected_systems: &'static [&'static str],
    pub references: &'static [&'static str],
}

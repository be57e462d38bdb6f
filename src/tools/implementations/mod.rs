// Tool implementations
//
// One tool per backend operation plus the catalog search. Every tool holds a
// clone of the shared BackendClient, so the mode is decided before any tool
// is built.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::backend::BackendClient;
use crate::errors::GatewayError;
use crate::tools::registry::ToolRegistry;

// Scan lifecycle
pub mod scans;

// Vulnerability catalog
pub mod vulnerabilities;

// Folders and health
pub mod status;

// Re-exports for convenience
pub use scans::{
    GetScanResultsTool, GetScanStatusTool, ListScanTemplatesTool, ListScansTool, StartScanTool,
};
pub use status::{CheckApiStatusTool, ListFoldersTool};
pub use vulnerabilities::{GetVulnerabilityDetailsTool, SearchVulnerabilitiesTool};

/// Registry with every gateway tool, in presentation order
pub fn default_registry(client: BackendClient) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register(Box::new(ListScanTemplatesTool::new(client.clone())))?;
    registry.register(Box::new(StartScanTool::new(client.clone())))?;
    registry.register(Box::new(GetScanStatusTool::new(client.clone())))?;
    registry.register(Box::new(GetScanResultsTool::new(client.clone())))?;
    registry.register(Box::new(ListScansTool::new(client.clone())))?;
    registry.register(Box::new(GetVulnerabilityDetailsTool::new(client.clone())))?;
    registry.register(Box::new(SearchVulnerabilitiesTool))?;
    registry.register(Box::new(ListFoldersTool::new(client.clone())))?;
    registry.register(Box::new(CheckApiStatusTool::new(client)))?;

    Ok(registry)
}

/// Two-space indented JSON, the text form of every structured result
pub(crate) fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize tool result")
}

/// Required string argument
pub(crate) fn str_arg<'a>(input: &'a Value, key: &str) -> Result<&'a str, GatewayError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::validation(format!("{} must be a string", key)))
}

/// Optional string argument; null counts as absent
pub(crate) fn opt_str_arg<'a>(
    input: &'a Value,
    key: &str,
) -> Result<Option<&'a str>, GatewayError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(GatewayError::validation(format!("{} must be a string", key))),
    }
}

/// Optional non-negative integer argument; null counts as absent
pub(crate) fn opt_u64_arg(input: &Value, key: &str) -> Result<Option<u64>, GatewayError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            GatewayError::validation(format!("{} must be a non-negative integer", key))
        }),
    }
}

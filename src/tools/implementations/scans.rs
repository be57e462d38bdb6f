// Scan lifecycle tools - templates, start, status, results, listing

use crate::backend::{BackendClient, ScanId};
use crate::tools::implementations::{opt_str_arg, opt_u64_arg, pretty, str_arg};
use crate::tools::registry::Tool;
use crate::tools::types::ToolInputSchema;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

fn scan_id_schema() -> ToolInputSchema {
    ToolInputSchema::empty().property(
        "scan_id",
        json!({
            "type": ["integer", "string"],
            "description": "Scan ID",
            "minLength": 1,
            "minimum": 0
        }),
        true,
    )
}

pub struct ListScanTemplatesTool {
    client: BackendClient,
}

impl ListScanTemplatesTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListScanTemplatesTool {
    fn name(&self) -> &str {
        "list_scan_templates"
    }

    fn description(&self) -> &str {
        "List available Nessus scan templates"
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::empty()
    }

    async fn execute(&self, _input: Value) -> Result<String> {
        let list = self.client.list_scan_templates().await?;
        pretty(&list.templates)
    }
}

pub struct StartScanTool {
    client: BackendClient,
}

impl StartScanTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for StartScanTool {
    fn name(&self) -> &str {
        "start_scan"
    }

    fn description(&self) -> &str {
        "Start a new vulnerability scan against a target"
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![
            ("target", "IP / hostname"),
            ("scan_type", "Template title"),
        ])
        .string(
            "scan_name_prefix",
            "Prefix for the generated scan name",
            1,
            false,
        )
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let target = str_arg(&input, "target")?;
        let scan_type = str_arg(&input, "scan_type")?;
        let prefix = opt_str_arg(&input, "scan_name_prefix")?;

        let response = self.client.start_scan(target, scan_type, prefix).await?;
        pretty(&response)
    }
}

pub struct GetScanStatusTool {
    client: BackendClient,
}

impl GetScanStatusTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetScanStatusTool {
    fn name(&self) -> &str {
        "get_scan_status"
    }

    fn description(&self) -> &str {
        "Check the status of a running scan"
    }

    fn input_schema(&self) -> ToolInputSchema {
        scan_id_schema()
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let scan_id = ScanId::from_value(&input["scan_id"])?;
        let status = self.client.get_scan_status(&scan_id).await?;
        pretty(&status)
    }
}

pub struct GetScanResultsTool {
    client: BackendClient,
}

impl GetScanResultsTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetScanResultsTool {
    fn name(&self) -> &str {
        "get_scan_results"
    }

    fn description(&self) -> &str {
        "Get the results of a completed scan"
    }

    fn input_schema(&self) -> ToolInputSchema {
        scan_id_schema()
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let scan_id = ScanId::from_value(&input["scan_id"])?;
        let results = self.client.get_scan_results(&scan_id).await?;
        pretty(&results)
    }
}

pub struct ListScansTool {
    client: BackendClient,
}

impl ListScansTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListScansTool {
    fn name(&self) -> &str {
        "list_scans"
    }

    fn description(&self) -> &str {
        "List all scans and their status"
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::empty().integer("folder_id", "Only list scans in this folder", false)
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let folder_id = opt_u64_arg(&input, "folder_id")?;
        let list = self.client.list_scans(folder_id).await?;
        pretty(&list.scans)
    }
}

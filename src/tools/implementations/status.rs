// Folder listing and API health tools

use crate::backend::BackendClient;
use crate::tools::implementations::pretty;
use crate::tools::registry::Tool;
use crate::tools::types::ToolInputSchema;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Lists facade folders; only available against the real API
pub struct ListFoldersTool {
    client: BackendClient,
}

impl ListFoldersTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListFoldersTool {
    fn name(&self) -> &str {
        "list_folders"
    }

    fn description(&self) -> &str {
        "List Nessus scan folders (real API only)"
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::empty()
    }

    async fn execute(&self, _input: Value) -> Result<String> {
        let folders = self.client.list_folders().await?;
        pretty(&folders)
    }
}

pub struct CheckApiStatusTool {
    client: BackendClient,
}

impl CheckApiStatusTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CheckApiStatusTool {
    fn name(&self) -> &str {
        "check_api_status"
    }

    fn description(&self) -> &str {
        "Report whether the scan backend is reachable"
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::empty()
    }

    async fn execute(&self, _input: Value) -> Result<String> {
        // Health problems are reported in the body, never as a failed call
        let status = self.client.check_api_status().await;
        pretty(&status)
    }
}

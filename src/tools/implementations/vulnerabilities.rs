// Vulnerability tools - detail lookup and keyword search
//
// Search always reads the bundled catalog, whatever the backend mode.

use crate::backend::mock::catalog;
use crate::backend::BackendClient;
use crate::tools::implementations::{pretty, str_arg};
use crate::tools::registry::Tool;
use crate::tools::types::ToolInputSchema;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub struct GetVulnerabilityDetailsTool {
    client: BackendClient,
}

impl GetVulnerabilityDetailsTool {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetVulnerabilityDetailsTool {
    fn name(&self) -> &str {
        "get_vulnerability_details"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific vulnerability"
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![("vulnerability_id", "e.g. CVE-2024-12345")])
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let id = str_arg(&input, "vulnerability_id")?;
        let details = self.client.get_vulnerability_details(id).await?;
        pretty(&details)
    }
}

/// Keyword search over the catalog
pub struct SearchVulnerabilitiesTool;

#[async_trait]
impl Tool for SearchVulnerabilitiesTool {
    fn name(&self) -> &str {
        "search_vulnerabilities"
    }

    fn description(&self) -> &str {
        "Search for vulnerabilities by keyword"
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::empty().string("keyword", "Search keyword", 2, true)
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let keyword = str_arg(&input, "keyword")?.to_lowercase();
        let matches = catalog::search_vulnerabilities(&keyword);

        if matches.is_empty() {
            return Ok(format!("No hits for \"{}\"", keyword));
        }

        let listing = matches
            .iter()
            .enumerate()
            .map(|(i, v)| {
                format!(
                    "{}. {} ({}) | {} | CVSS {}",
                    i + 1,
                    v.name,
                    v.id,
                    v.severity.to_uppercase(),
                    v.cvss_score
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            "Found {} vulnerabilities for \"{}\":\n\n{}\n\nUse \"get_vulnerability_details\" with the desired id for full info.",
            matches.len(),
            keyword,
            listing
        ))
    }
}

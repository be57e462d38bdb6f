// Core types for the tool protocol surface
//
// Compatible with the MCP tools/list and tools/call result shapes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool descriptor returned by tools/list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: ToolInputSchema,
}

/// JSON Schema for tool input parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String, // Always "object"
    pub properties: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ToolInputSchema {
    /// Schema accepting no arguments
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Value::Object(Map::new()),
            required: Vec::new(),
        }
    }

    /// Create a simple schema with required non-empty string parameters
    pub fn simple(params: Vec<(&str, &str)>) -> Self {
        params
            .into_iter()
            .fold(Self::empty(), |schema, (param_name, param_desc)| {
                schema.string(param_name, param_desc, 1, true)
            })
    }

    /// Add a property with an explicit sub-schema
    pub fn property(mut self, name: &str, schema: Value, required: bool) -> Self {
        if let Value::Object(props) = &mut self.properties {
            props.insert(name.to_string(), schema);
        }
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a string property with a minimum length
    pub fn string(self, name: &str, description: &str, min_length: u64, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "string",
                "description": description,
                "minLength": min_length
            }),
            required,
        )
    }

    /// Add a non-negative integer property
    pub fn integer(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "integer",
                "description": description,
                "minimum": 0
            }),
            required,
        )
    }

    /// Iterate over (name, sub-schema) pairs
    pub fn properties(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.properties.as_object().into_iter().flatten()
    }
}

/// One item of a result envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
        }
    }
}

/// Result envelope returned for every tool call
///
/// Callers tell success from failure only through `is_error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl CallToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: true,
        }
    }

    /// All text blocks joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

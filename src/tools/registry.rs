// Tool registry and trait definition
//
// Keeps tools in registration (presentation) order and compiles each
// property schema once so argument validation is cheap per call.

use crate::errors::GatewayError;
use crate::tools::types::{ToolDefinition, ToolInputSchema};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use jsonschema::{Draft, Validator};
use serde_json::Value;
use std::collections::HashMap;

/// Tool trait - all tools must implement this
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (e.g., "start_scan")
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does
    fn description(&self) -> &str;

    /// JSON Schema defining expected input parameters
    fn input_schema(&self) -> ToolInputSchema;

    /// Execute the tool with arguments that already passed validation
    async fn execute(&self, input: Value) -> Result<String>;

    /// Get full tool definition (for tools/list)
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

struct RegisteredTool {
    tool: Box<dyn Tool>,
    definition: ToolDefinition,
    fields: Vec<(String, Validator)>,
}

/// Registry of available tools
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool; names must be unique and schemas must compile
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        let definition = tool.definition();
        let name = definition.name.clone();

        if self.index.contains_key(&name) {
            bail!("Tool '{}' is already registered", name);
        }

        let mut fields = Vec::new();
        for (field, schema) in definition.input_schema.properties() {
            let validator = jsonschema::options()
                .with_draft(Draft::Draft7)
                .build(schema)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("Invalid schema for '{}.{}'", name, field))?;
            fields.push((field.clone(), validator));
        }

        self.index.insert(name, self.tools.len());
        self.tools.push(RegisteredTool {
            tool,
            definition,
            fields,
        });
        Ok(())
    }

    fn entry(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.entry(name).map(|entry| entry.tool.as_ref())
    }

    /// Check if tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// List all tool names in presentation order
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.definition.name.clone()).collect()
    }

    /// Get all tool definitions in presentation order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition.clone()).collect()
    }

    /// Check arguments against a tool's input schema
    ///
    /// Every required field must be present and non-null, and every supplied
    /// field with a schema must satisfy it. Unknown fields are ignored.
    pub fn validate(&self, name: &str, input: &Value) -> Result<(), GatewayError> {
        let entry = self
            .entry(name)
            .ok_or_else(|| GatewayError::validation(format!("no schema for tool \"{}\"", name)))?;

        let args = match input {
            Value::Object(map) => map,
            other => {
                return Err(GatewayError::validation(format!(
                    "arguments must be an object, got {}",
                    crate::backend::types::json_type_name(other)
                )))
            }
        };

        for required in &entry.definition.input_schema.required {
            match args.get(required) {
                None | Some(Value::Null) => {
                    return Err(GatewayError::validation(format!(
                        "missing required argument \"{}\"",
                        required
                    )))
                }
                Some(_) => {}
            }
        }

        for (field, validator) in &entry.fields {
            let Some(value) = args.get(field) else {
                continue;
            };
            if value.is_null() && !entry.definition.input_schema.required.contains(field) {
                continue;
            }
            if let Some(err) = validator.iter_errors(value).next() {
                return Err(GatewayError::validation(format!("{}: {}", field, err)));
            }
        }

        Ok(())
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Mock tool for testing
    struct MockTool {
        name: String,
    }

    #[async_trait]
    impl Tool for MockTool {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "A mock tool for testing"
        }

        fn input_schema(&self) -> ToolInputSchema {
            ToolInputSchema::simple(vec![("param", "A test parameter")])
                .integer("count", "How many", false)
                .property(
                    "id",
                    json!({"type": ["integer", "string"], "minLength": 1, "minimum": 0}),
                    false,
                )
        }

        async fn execute(&self, _input: Value) -> Result<String> {
            Ok("Mock result".to_string())
        }
    }

    fn registry_with(names: &[&str]) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        for name in names {
            registry
                .register(Box::new(MockTool {
                    name: name.to_string(),
                }))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_registry_registration() {
        let registry = registry_with(&["test"]);
        assert!(registry.has_tool("test"));
        assert!(!registry.has_tool("nonexistent"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry_with(&["test"]);
        let result = registry.register(Box::new(MockTool {
            name: "test".to_string(),
        }));
        assert!(result.is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry = registry_with(&["zeta", "alpha", "mid"]);
        assert_eq!(registry.tool_names(), vec!["zeta", "alpha", "mid"]);
        let defs = registry.definitions();
        assert_eq!(defs[0].name, "zeta");
        assert_eq!(defs[2].name, "mid");
    }

    #[test]
    fn test_validate_required_and_types() {
        let registry = registry_with(&["test"]);

        assert!(registry.validate("test", &json!({"param": "x"})).is_ok());
        assert!(registry.validate("test", &json!({"param": "x", "extra": 1})).is_ok());

        let err = registry.validate("test", &json!({})).unwrap_err();
        assert_eq!(
            err,
            GatewayError::validation("missing required argument \"param\"")
        );

        assert!(registry.validate("test", &json!({"param": ""})).is_err());
        assert!(registry.validate("test", &json!({"param": 5})).is_err());
        assert!(registry.validate("test", &json!({"param": "x", "count": "3"})).is_err());
        assert!(registry.validate("test", &json!({"param": "x", "count": -1})).is_err());
        assert!(registry.validate("test", &json!([1, 2])).is_err());
    }

    #[test]
    fn test_validate_number_or_string_field() {
        let registry = registry_with(&["test"]);
        assert!(registry.validate("test", &json!({"param": "x", "id": 4})).is_ok());
        assert!(registry.validate("test", &json!({"param": "x", "id": "4"})).is_ok());
        assert!(registry.validate("test", &json!({"param": "x", "id": ""})).is_err());
        assert!(registry.validate("test", &json!({"param": "x", "id": true})).is_err());
    }

    #[test]
    fn test_validation_message_names_field() {
        let registry = registry_with(&["test"]);
        let err = registry.validate("test", &json!({"param": 5})).unwrap_err();
        assert!(err.to_string().starts_with("param: "));
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let tool = MockTool {
            name: "test".to_string(),
        };
        let result = tool
            .execute(serde_json::json!({"param": "value"}))
            .await
            .unwrap();
        assert_eq!(result, "Mock result");
    }
}

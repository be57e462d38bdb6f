// Tool dispatcher - validates, executes and wraps every call
//
// Each dispatch walks Received -> Validating -> Executing -> Completed | Failed
// on its own. Nothing is shared between calls besides the immutable registry,
// so any number of dispatches may be in flight at once.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::errors::normalize;
use crate::tools::registry::ToolRegistry;
use crate::tools::types::{CallToolResult, ToolDefinition};

/// Lifecycle of a single dispatch, used for log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Received,
    Validating,
    Executing,
    Completed,
    Failed,
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchPhase::Received => "received",
            DispatchPhase::Validating => "validating",
            DispatchPhase::Executing => "executing",
            DispatchPhase::Completed => "completed",
            DispatchPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Routes `tools/call` requests to registered tools
#[derive(Clone)]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Every descriptor, in presentation order
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    /// Run one tool call and always return an envelope
    #[instrument(skip(self, arguments), fields(tool = %name))]
    pub async fn dispatch(&self, name: &str, arguments: Value) -> CallToolResult {
        debug!(phase = %DispatchPhase::Received, "Tool call received");

        let Some(tool) = self.registry.get(name) else {
            warn!(phase = %DispatchPhase::Failed, "Unknown tool requested");
            return CallToolResult::error(format!("Error: Unknown tool \"{}\"", name));
        };

        // Omitted arguments behave like an empty object
        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        debug!(phase = %DispatchPhase::Validating, "Validating arguments");
        if let Err(err) = self.registry.validate(name, &arguments) {
            let normalized = normalize(&anyhow::Error::new(err));
            info!(
                phase = %DispatchPhase::Failed,
                kind = %normalized.kind,
                "Tool arguments rejected"
            );
            return CallToolResult::error(format!("Error: {}", normalized.message));
        }

        debug!(phase = %DispatchPhase::Executing, "Executing tool");
        match tool.execute(arguments).await {
            Ok(text) => {
                debug!(phase = %DispatchPhase::Completed, "Tool call completed");
                CallToolResult::success(text)
            }
            Err(err) => {
                let normalized = normalize(&err);
                warn!(
                    phase = %DispatchPhase::Failed,
                    kind = %normalized.kind,
                    status = ?normalized.status,
                    "Tool call failed: {}",
                    normalized.message
                );
                CallToolResult::error(format!("Error: {}", normalized.message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GatewayError;
    use crate::tools::registry::Tool;
    use crate::tools::types::ToolInputSchema;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoTool {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the message back"
        }

        fn input_schema(&self) -> ToolInputSchema {
            ToolInputSchema::simple(vec![("message", "Text to echo")])
        }

        async fn execute(&self, input: Value) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let message = input["message"].as_str().unwrap_or_default();
            if message == "fail" {
                return Err(GatewayError::http_status(500, "boom").into());
            }
            if message == "plain" {
                anyhow::bail!("plain failure");
            }
            Ok(message.to_string())
        }
    }

    fn dispatcher() -> (ToolDispatcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry
            .register(Box::new(EchoTool {
                calls: calls.clone(),
            }))
            .unwrap();
        (ToolDispatcher::new(registry), calls)
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (dispatcher, calls) = dispatcher();
        let result = dispatcher.dispatch("nope", json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.text(), "Error: Unknown tool \"nope\"");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_execution() {
        let (dispatcher, calls) = dispatcher();

        let result = dispatcher.dispatch("echo", Value::Null).await;
        assert!(result.is_error);
        assert_eq!(
            result.text(),
            "Error: Invalid arguments: missing required argument \"message\""
        );

        let result = dispatcher.dispatch("echo", json!({"message": 3})).await;
        assert!(result.is_error);
        assert!(result.text().starts_with("Error: Invalid arguments: message: "));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let (dispatcher, calls) = dispatcher();
        let result = dispatcher.dispatch("echo", json!({"message": "hi"})).await;
        assert!(!result.is_error);
        assert_eq!(result.text(), "hi");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execution_errors_are_normalized() {
        let (dispatcher, _) = dispatcher();

        let result = dispatcher.dispatch("echo", json!({"message": "fail"})).await;
        assert!(result.is_error);
        assert_eq!(
            result.text(),
            "Error: API request failed with status 500: boom"
        );

        let result = dispatcher
            .dispatch("echo", json!({"message": "plain"}))
            .await;
        assert_eq!(result.text(), "Error: Unexpected error: plain failure");
    }

    #[tokio::test]
    async fn test_concurrent_dispatches() {
        let (dispatcher, calls) = dispatcher();
        let mut handles = Vec::new();
        for i in 0..16 {
            let dispatcher = dispatcher.clone();
            handles.push(tokio::spawn(async move {
                dispatcher
                    .dispatch("echo", json!({"message": format!("m{}", i)}))
                    .await
            }));
        }
        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap();
            assert_eq!(result.text(), format!("m{}", i));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn test_list_tools() {
        let (dispatcher, _) = dispatcher();
        let tools = dispatcher.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
        assert_eq!(DispatchPhase::Executing.to_string(), "executing");
    }
}

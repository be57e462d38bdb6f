// MCP server - line-delimited JSON-RPC over stdio
//
// Each incoming line is handled on its own task so slow tool calls never
// block other requests. Responses are funnelled through one writer, so lines
// on stdout are never interleaved.

pub mod protocol;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerInfo};

use anyhow::Result;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::tools::ToolDispatcher;
use protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};

#[derive(Clone)]
pub struct McpServer {
    dispatcher: ToolDispatcher,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher,
            info: ServerInfo::default(),
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle one raw line; `None` when nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                warn!("Dropping unparseable message: {}", e);
                Some(response_value(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                )))
            }
        }
    }

    /// Handle one decoded message; notifications produce no response
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let fallback_id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(response_value(JsonRpcResponse::failure(
                    fallback_id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                )))
            }
        };

        debug!(method = %request.method, "Received request");

        if request.is_notification() {
            if request.method != "notifications/initialized" {
                debug!(method = %request.method, "Ignoring notification");
            }
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {"tools": {}},
                    "serverInfo": self.info,
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                JsonRpcResponse::success(id, json!({"tools": self.dispatcher.list_tools()}))
            }
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };

        Some(response_value(response))
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params = params.unwrap_or(Value::Null);
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = self.dispatcher.dispatch(name, arguments).await;
        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    /// Serve until the reader hits EOF and every in-flight call has answered
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Value>();

        let read_loop = async move {
            let mut reader = BufReader::new(reader);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                if reader.read_until(b'\n', &mut buf).await? == 0 {
                    break;
                }
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                // A bad line gets a parse error; the stream stays open
                let line = match String::from_utf8(std::mem::take(&mut buf)) {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Dropping non-UTF-8 message: {}", e);
                        let _ = tx.send(response_value(JsonRpcResponse::failure(
                            Value::Null,
                            PARSE_ERROR,
                            format!("Parse error: {}", e),
                        )));
                        continue;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                let server = self.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_line(&line).await {
                        // Receiver only closes after the writer fails
                        let _ = tx.send(response);
                    }
                });
            }
            debug!("Input closed");
            Ok::<_, anyhow::Error>(())
        };

        let write_loop = async {
            while let Some(response) = rx.recv().await {
                let mut bytes = serde_json::to_vec(&response)?;
                bytes.push(b'\n');
                writer.write_all(&bytes).await?;
                writer.flush().await?;
            }
            Ok::<_, anyhow::Error>(())
        };

        let (read, write) = tokio::join!(read_loop, write_loop);
        read?;
        write
    }

    /// Serve stdin/stdout until EOF or Ctrl-C
    pub async fn run_stdio(&self) -> Result<()> {
        info!(
            server = %self.info.name,
            version = %self.info.version,
            "MCP server listening on stdio"
        );

        tokio::select! {
            result = self.serve(tokio::io::stdin(), tokio::io::stdout()) => result,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, shutting down");
                Ok(())
            }
        }
    }
}

fn response_value(response: JsonRpcResponse) -> Value {
    serde_json::to_value(response).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendClient;
    use crate::config::BackendConfig;
    use crate::tools::default_registry;

    fn server() -> McpServer {
        let client = BackendClient::new(BackendConfig::mock()).unwrap();
        McpServer::new(ToolDispatcher::new(default_registry(client).unwrap()))
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server()
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {}
            }))
            .await
            .unwrap();
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "nessus-server");
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_notifications_are_silent() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}))
            .await
            .unwrap();
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 9);
        assert_eq!(tools[0]["name"], "list_scan_templates");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_tools_call_wraps_envelope() {
        let response = server()
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "missing_tool", "arguments": {}}
            }))
            .await
            .unwrap();
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "Error: Unknown tool \"missing_tool\""
        );
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let server = server();

        let response = server
            .handle_message(json!({"jsonrpc": "2.0", "id": 4, "method": "resources/list"}))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);

        let response = server
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {}
            }))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], INVALID_PARAMS);

        let response = server.handle_line("{not json").await.unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_serve_answers_every_request() {
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\",\"params\":{}}\n",
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",\"params\":{\"name\":\"start_scan\",\"arguments\":{\"target\":\"10.0.0.5\",\"scan_type\":\"Basic Network Scan\"}}}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n",
        );

        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let mut ids: Vec<i64> = text
            .lines()
            .map(|line| {
                serde_json::from_str::<Value>(line).unwrap()["id"]
                    .as_i64()
                    .unwrap()
            })
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_null_id_still_gets_response() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": null, "method": "ping"}))
            .await
            .unwrap();
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_serve_survives_invalid_utf8() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\r\n");

        let mut output = Vec::new();
        server().serve(input.as_slice(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);

        let mut ids: Vec<i64> = responses.iter().filter_map(|r| r["id"].as_i64()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);

        let failure = responses.iter().find(|r| r["id"].is_null()).unwrap();
        assert_eq!(failure["error"]["code"], PARSE_ERROR);
    }
}

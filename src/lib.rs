// Nessus MCP Tool Gateway
// Library exports

pub mod backend; // Dual-mode backend client (mock store / HTTP facade)
pub mod config;
pub mod errors;
pub mod server; // MCP stdio server
pub mod tools; // Tool registry and dispatcher

pub use backend::BackendClient;
pub use errors::{normalize, ErrorKind, GatewayError, NormalizedError};
pub use server::McpServer;
pub use tools::{default_registry, CallToolResult, ToolDispatcher};

// Tool gateway
//
// Registry of tool descriptors, the dispatcher that validates and runs calls,
// and the result envelope handed back to the protocol layer.

pub mod dispatcher;
pub mod implementations;
pub mod registry;
pub mod types;

pub use dispatcher::{DispatchPhase, ToolDispatcher};
pub use implementations::default_registry;
pub use registry::{Tool, ToolRegistry};
pub use types::{CallToolResult, ContentBlock, ToolDefinition, ToolInputSchema};

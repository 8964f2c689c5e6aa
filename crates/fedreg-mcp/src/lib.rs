//! # fedreg-mcp
//!
//! MCP method dispatch handler (APPLICATION layer).
//!
//! Provides `McpHandler` and `JsonRpcOutput` for routing JSON-RPC requests
//! to the appropriate MCP method implementations, and the catalog of
//! Federal Register tools those requests reach.

mod dispatch;
pub mod error;
pub mod handler;
pub mod tools;

pub use error::ToolError;
pub use handler::{JsonRpcOutput, McpHandler, ToolSettings};
pub use tools::{catalog, ToolSpec};

//! MCP method dispatch functions.
//!
//! Each sub-module handles one MCP method as free functions,
//! keeping `McpHandler` itself thin (struct + routing only).

pub(crate) mod initialize;
pub(crate) mod ping;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

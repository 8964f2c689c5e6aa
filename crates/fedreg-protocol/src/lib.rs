//! # fedreg-protocol
//!
//! MCP protocol and JSON-RPC 2.0 type definitions.
//! This crate defines the wire format spoken between AI assistants
//! and the Federal Register tool server, independent of transport.

pub mod jsonrpc;
pub mod mcp;
pub mod schema;

pub use jsonrpc::*;
pub use mcp::methods;

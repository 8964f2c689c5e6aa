//! # fedreg-transport-stdio
//!
//! Stdio transport adapter for MCP JSON-RPC communication.
//!
//! Provides line-delimited JSON framing over any async reader/writer
//! pair, and a server loop that feeds it to an `McpHandler`.

pub mod error;
pub mod server;
pub mod transport;

pub use error::TransportError;
pub use server::{serve_stdio, McpServer};
pub use transport::LineTransport;

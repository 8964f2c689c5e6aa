//! HTTP transport adapter for the fedreg MCP server.
//!
//! Exposes MCP over `POST /mcp`, keyed by the `Mcp-Session-Id` header,
//! with `DELETE /mcp` to end a session and `GET /health` for liveness.
//! An optional Bearer token guards `/mcp`.

pub mod auth;
mod error;
pub mod router;
pub mod server;
pub mod session;

pub use error::HttpTransportError;
pub use router::{build_router, AppState, SESSION_HEADER};
pub use server::HttpServer;
pub use session::SessionRegistry;

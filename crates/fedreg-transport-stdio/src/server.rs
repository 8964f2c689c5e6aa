//! MCP server loop over stdio transport.
//!
//! Reads JSON-RPC requests line by line, dispatches them via
//! `McpHandler`, and writes responses back. Notifications (no `id`)
//! are handled without a response.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

use fedreg_mcp::{JsonRpcOutput, McpHandler};
use fedreg_protocol::{error_codes, Incoming, JsonRpcErrorResponse, RequestId};

use crate::error::TransportError;
use crate::transport::LineTransport;

/// MCP server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: LineTransport<R, W>,
    handler: Arc<McpHandler>,
}

impl<R, W> McpServer<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new server with the given transport and handler.
    pub fn new(transport: LineTransport<R, W>, handler: Arc<McpHandler>) -> Self {
        Self { transport, handler }
    }

    /// Runs the server loop until the input is closed.
    ///
    /// Requests are answered in arrival order, one at a time.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("MCP server starting on stdio");

        while let Some(line) = self.transport.next_message().await? {
            if let Some(output) = self.handle_line(&line).await {
                self.transport.send(&output).await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Consumes the server, returning the transport's writer.
    pub fn into_writer(self) -> W {
        self.transport.into_writer()
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcOutput> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to parse JSON-RPC message");
                return Some(error_output(
                    RequestId::Number(0),
                    error_codes::PARSE_ERROR,
                    format!("parse error: {e}"),
                ));
            }
        };

        let raw_id = value
            .get("id")
            .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok())
            .unwrap_or(RequestId::Number(0));

        match Incoming::from_value(value) {
            Ok(Incoming::Request(request)) => {
                debug!(method = %request.method, id = %request.id, "received request");
                Some(self.handler.dispatch(&request).await)
            }
            Ok(Incoming::Notification(notification)) => {
                debug!(method = %notification.method, "received notification");
                self.handler.handle_notification(&notification);
                None
            }
            Err(e) => {
                warn!(error = %e, "not a JSON-RPC message");
                Some(error_output(
                    raw_id,
                    error_codes::INVALID_REQUEST,
                    format!("invalid request: {e}"),
                ))
            }
        }
    }
}

fn error_output(id: RequestId, code: i32, message: String) -> JsonRpcOutput {
    JsonRpcOutput::Error(JsonRpcErrorResponse::error(id, code, message))
}

/// Serves MCP on the process's stdin/stdout until stdin closes.
pub async fn serve_stdio(handler: Arc<McpHandler>) -> Result<(), TransportError> {
    let transport = LineTransport::new(tokio::io::stdin(), tokio::io::stdout());
    McpServer::new(transport, handler).run().await
}

//! HTTP server that binds the MCP router to a TCP socket.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use fedreg_mcp::McpHandler;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};
use crate::session::SessionRegistry;

/// Axum-based HTTP server for the MCP transport.
pub struct HttpServer {
    pub(crate) addr: String,
    pub(crate) state: AppState,
}

impl HttpServer {
    /// Creates a new HTTP server.
    ///
    /// # Arguments
    ///
    /// * `handler` - shared MCP dispatcher
    /// * `host` - interface to bind, e.g. `127.0.0.1`
    /// * `port` - TCP port to listen on, `0` for any free port
    /// * `token` - optional Bearer token guarding `/mcp`
    pub fn new(handler: Arc<McpHandler>, host: &str, port: u16, token: Option<String>) -> Self {
        let addr = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        Self {
            addr,
            state: AppState::new(handler, token),
        }
    }

    /// Session registry served by this instance.
    pub fn sessions(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.state.sessions)
    }

    /// Serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "cannot listen for ctrl-c; serving until killed");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serves until `shutdown` resolves, then drops every session.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), HttpTransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr.as_str())
            .await
            .map_err(|e| HttpTransportError::Bind {
                addr: self.addr.clone(),
                source: e,
            })?;
        let local = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| self.addr.clone());
        tracing::info!(addr = %local, "fedreg MCP HTTP server ready");

        let sessions = Arc::clone(&self.state.sessions);
        let result = axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()));

        let dropped = sessions.clear().await;
        tracing::info!(sessions = dropped, "HTTP server stopped");
        result
    }
}

//! Error types for the HTTP transport.

use fedreg_types::{DiagnosticError, ErrorKind, FedRegError};
use thiserror::Error;

/// Errors that can occur in the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(String),
}

impl DiagnosticError for HttpTransportError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Bind { addr, .. } => Some(format!("Another process may already listen on {addr}.")),
            Self::Serve(_) => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Bind { .. } => Some("Pass a free port with --port or set [server] port.".into()),
            Self::Serve(_) => None,
        }
    }
}

impl From<HttpTransportError> for FedRegError {
    fn from(e: HttpTransportError) -> Self {
        FedRegError::new(ErrorKind::Internal, e.to_string()).with_context("http transport")
    }
}

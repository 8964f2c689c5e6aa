//! Transport-layer error types.

use fedreg_types::{DiagnosticError, ErrorKind, FedRegError};
use thiserror::Error;

/// Errors from the stdio transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from the input stream.
    #[error("read error: {0}")]
    Read(String),
    /// Failed to write to the output stream.
    #[error("write error: {0}")]
    Write(String),
    /// A response could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
}

impl DiagnosticError for TransportError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Read(_) | Self::Write(_) => {
                Some("The MCP client closed or broke the stdio pipe.".into())
            }
            Self::Encode(_) => None,
        }
    }
}

impl From<TransportError> for FedRegError {
    fn from(e: TransportError) -> Self {
        FedRegError::new(ErrorKind::Internal, e.to_string()).with_context("stdio transport")
    }
}

//! Tool-layer error types.

use fedreg_client::ApiError;
use fedreg_protocol::error_codes;
use fedreg_types::{DiagnosticError, ErrorKind, FedRegError};
use thiserror::Error;

/// Errors raised while resolving or running a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name exists.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Arguments did not match the tool's input schema.
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
    /// The Federal Register API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The result could not be rendered.
    #[error("could not render result: {0}")]
    Output(String),
}

impl ToolError {
    pub(crate) fn invalid(tool: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    /// JSON-RPC error code for failures answered as protocol errors.
    ///
    /// Returns `None` for errors reported inside a tool result instead.
    pub fn rpc_code(&self) -> Option<i32> {
        match self {
            Self::UnknownTool(_) | Self::InvalidArguments { .. } => {
                Some(error_codes::INVALID_PARAMS)
            }
            Self::Output(_) => Some(error_codes::INTERNAL_ERROR),
            Self::Api(_) => None,
        }
    }
}

impl DiagnosticError for ToolError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::UnknownTool(_) => Some("Run `fedreg tools` to see the tool names.".into()),
            Self::Api(e) => e.hint(),
            _ => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Api(e) => e.fix(),
            _ => None,
        }
    }
}

impl From<ToolError> for FedRegError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::Api(api) => api.into(),
            ToolError::UnknownTool(_) => FedRegError::not_found(e.to_string()),
            ToolError::InvalidArguments { tool, message } => {
                FedRegError::invalid_input(message).with_context(tool)
            }
            ToolError::Output(_) => FedRegError::new(ErrorKind::Internal, e.to_string()),
        }
    }
}

//! Handles the `initialize` MCP method.

use serde_json::Value;
use tracing::info;

use fedreg_protocol::mcp::initialize::{
    negotiate_version, InitializeParams, InitializeResult, ServerCapabilities, ServerInfo,
    ToolCapability,
};
use fedreg_protocol::{error_codes, JsonRpcErrorResponse, RequestId};

use crate::handler::JsonRpcOutput;

const INSTRUCTIONS: &str = "Tools for the Federal Register API. \
Search documents with search_documents, fetch records by document number, \
look up executive orders by their number, and read full texts. \
Dates are YYYY-MM-DD; agencies and presidents are slugs such as \
environmental-protection-agency or joe-biden.";

/// Handles the `initialize` request and returns the server capabilities.
pub(crate) fn handle_initialize(id: RequestId, params: &Option<Value>) -> JsonRpcOutput {
    let requested = match params {
        Some(p) => match serde_json::from_value::<InitializeParams>(p.clone()) {
            Ok(params) => {
                info!(
                    client = %params.client_info.name,
                    version = %params.protocol_version,
                    "initialize"
                );
                Some(params.protocol_version)
            }
            Err(e) => {
                return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid initialize params: {e}"),
                ));
            }
        },
        None => None,
    };

    let result = InitializeResult {
        protocol_version: negotiate_version(requested.as_deref()).to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolCapability::default()),
        },
        server_info: ServerInfo {
            name: "fedreg".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        instructions: Some(INSTRUCTIONS.to_string()),
    };

    JsonRpcOutput::from_result(id, &result)
}

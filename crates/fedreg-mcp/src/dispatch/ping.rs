//! Handles the `ping` MCP method.

use serde_json::json;

use fedreg_protocol::{JsonRpcResponse, RequestId};

use crate::handler::JsonRpcOutput;

/// Answers a liveness check with an empty result.
pub(crate) fn handle_ping(id: RequestId) -> JsonRpcOutput {
    JsonRpcOutput::Success(JsonRpcResponse::success(id, json!({})))
}

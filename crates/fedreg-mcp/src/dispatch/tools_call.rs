//! Handles the `tools/call` MCP method.

use serde_json::{json, Value};
use tracing::{debug, warn};

use fedreg_protocol::mcp::tools::{ToolsCallParams, ToolsCallResult};
use fedreg_protocol::schema::validate_arguments;
use fedreg_protocol::{error_codes, JsonRpcErrorResponse, RequestId};
use fedreg_types::DiagnosticError;

use crate::dispatch::tools_list::build_input_schema;
use crate::error::ToolError;
use crate::handler::JsonRpcOutput;
use crate::tools::{self, ToolContext};

/// Handles the `tools/call` request.
pub(crate) async fn handle_tools_call(
    id: RequestId,
    params: &Option<Value>,
    ctx: &ToolContext<'_>,
) -> JsonRpcOutput {
    // 1. Parse params
    let call_params = match params {
        Some(p) => match serde_json::from_value::<ToolsCallParams>(p.clone()) {
            Ok(cp) => cp,
            Err(e) => {
                return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid tools/call params: {e}"),
                ));
            }
        },
        None => {
            return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "tools/call requires params",
            ));
        }
    };

    // 2. Run the tool
    match run_tool(ctx, &call_params.name, call_params.arguments).await {
        Ok(result) => JsonRpcOutput::from_result(id, &result),
        Err(e) => JsonRpcOutput::Error(
            JsonRpcErrorResponse::error(
                id,
                e.rpc_code().unwrap_or(error_codes::INTERNAL_ERROR),
                e.to_string(),
            )
            .with_data(json!({ "tool": call_params.name })),
        ),
    }
}

/// Validates arguments against the tool's schema and runs it.
///
/// API failures are folded into an `isError` result so the assistant
/// sees them; everything else is returned as an error.
pub(crate) async fn run_tool(
    ctx: &ToolContext<'_>,
    name: &str,
    arguments: Value,
) -> Result<ToolsCallResult, ToolError> {
    let spec = tools::find(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    validate_arguments(&build_input_schema(&spec.arguments), &arguments)
        .map_err(|e| ToolError::invalid(name, e.to_string()))?;

    debug!(tool = %name, "executing tool via MCP");
    match tools::call(ctx, name, arguments).await {
        Ok(output) => Ok(ToolsCallResult::text(output.render()?)),
        Err(ToolError::Api(e)) => {
            warn!(tool = %name, error = %e, "upstream call failed");
            let mut text = e.to_string();
            if let Some(hint) = e.hint() {
                text.push_str("\n\n");
                text.push_str(&hint);
            }
            Ok(ToolsCallResult::error(text))
        }
        Err(e) => Err(e),
    }
}

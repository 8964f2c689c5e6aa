//! Handles the `tools/list` MCP method.

use serde_json::{Map, Value};

use fedreg_protocol::mcp::tools::{McpToolDefinition, ToolsListParams, ToolsListResult};
use fedreg_protocol::{error_codes, JsonRpcErrorResponse, RequestId};
use fedreg_types::ToolArgument;

use crate::handler::JsonRpcOutput;
use crate::tools::catalog;

/// Handles the `tools/list` request.
///
/// The catalog is small and static, so it is returned in one page.
pub(crate) fn handle_tools_list(id: RequestId, params: &Option<Value>) -> JsonRpcOutput {
    if let Some(p) = params {
        if let Err(e) = serde_json::from_value::<ToolsListParams>(p.clone()) {
            return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("invalid tools/list params: {e}"),
            ));
        }
    }

    let result = ToolsListResult {
        tools: definitions(),
        next_cursor: None,
    };
    JsonRpcOutput::from_result(id, &result)
}

pub(crate) fn definitions() -> Vec<McpToolDefinition> {
    catalog()
        .iter()
        .map(|spec| McpToolDefinition {
            name: spec.name.to_string(),
            description: Some(spec.description.to_string()),
            input_schema: build_input_schema(&spec.arguments),
        })
        .collect()
}

/// Builds a JSON Schema `inputSchema` from tool arguments.
pub(crate) fn build_input_schema(arguments: &[ToolArgument]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for arg in arguments {
        let mut prop = Map::new();
        prop.insert("type".to_string(), Value::String(arg.arg_type.clone()));
        prop.insert(
            "description".to_string(),
            Value::String(arg.description.clone()),
        );

        let allowed: Vec<Value> = arg.allowed.iter().cloned().map(Value::String).collect();
        match &arg.items {
            Some(item_type) => {
                let mut items = Map::new();
                items.insert("type".to_string(), Value::String(item_type.clone()));
                if !allowed.is_empty() {
                    items.insert("enum".to_string(), Value::Array(allowed));
                }
                prop.insert("items".to_string(), Value::Object(items));
            }
            None if !allowed.is_empty() => {
                prop.insert("enum".to_string(), Value::Array(allowed));
            }
            None => {}
        }
        if let Some(default) = &arg.default {
            prop.insert("default".to_string(), default.clone());
        }

        properties.insert(arg.name.clone(), Value::Object(prop));
        if arg.required {
            required.push(Value::String(arg.name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(schema)
}

//! MCP request handler.
//!
//! Routes JSON-RPC methods to the dispatch functions and owns the
//! shared state every tool call needs: the API port, the tool settings
//! and the clock used by the recent-items tools.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use fedreg_client::{FederalRegisterApi, PageLimits};
use fedreg_protocol::mcp::methods;
use fedreg_protocol::mcp::tools::{McpToolDefinition, ToolsCallResult};
use fedreg_protocol::{
    error_codes, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    RequestId,
};
use fedreg_types::FieldDefaults;

use crate::dispatch::{initialize, ping, tools_call, tools_list};
use crate::error::ToolError;
use crate::tools::ToolContext;

/// Output of a JSON-RPC dispatch: either a success or an error response.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JsonRpcOutput {
    /// Successful response.
    Success(JsonRpcResponse),
    /// Error response.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Serializes the output to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns the id of the request this output answers.
    pub fn id(&self) -> &RequestId {
        match self {
            Self::Success(r) => &r.id,
            Self::Error(r) => &r.id,
        }
    }

    pub(crate) fn from_result<T: Serialize>(id: RequestId, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(v) => Self::Success(JsonRpcResponse::success(id, v)),
            Err(e) => Self::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                e.to_string(),
            )),
        }
    }
}

/// Knobs shared by every tool call.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    /// Default field selections per operation.
    pub fields: FieldDefaults,
    /// API paging ceilings.
    pub limits: PageLimits,
    /// Page size of the executive-order-by-number search.
    pub lookup_page_size: u32,
    /// `per_page` used when a search tool is called without one.
    pub default_per_page: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            fields: FieldDefaults::default(),
            limits: PageLimits::default(),
            lookup_page_size: 20,
            default_per_page: 20,
        }
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Routes JSON-RPC requests to MCP method implementations.
///
/// Cheap to share behind an `Arc`; holds no per-session state.
pub struct McpHandler {
    api: Arc<dyn FederalRegisterApi>,
    settings: ToolSettings,
    today: fn() -> NaiveDate,
}

impl McpHandler {
    /// Creates a handler over the given API port.
    pub fn new(api: Arc<dyn FederalRegisterApi>, settings: ToolSettings) -> Self {
        Self {
            api,
            settings,
            today: local_today,
        }
    }

    /// Replaces the clock used by the recent-items tools.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Dispatches a JSON-RPC request to the appropriate handler.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        debug!(method = %request.method, %id, "dispatching");

        match request.method.as_str() {
            methods::INITIALIZE => initialize::handle_initialize(id, &request.params),
            methods::PING => ping::handle_ping(id),
            methods::TOOLS_LIST => tools_list::handle_tools_list(id, &request.params),
            methods::TOOLS_CALL => {
                tools_call::handle_tools_call(id, &request.params, &self.context()).await
            }
            other => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        }
    }

    /// Handles a notification. Notifications never produce a response.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            methods::NOTIFICATION_INITIALIZED => info!("client initialized"),
            methods::NOTIFICATION_CANCELLED => {
                let request_id = notification
                    .params
                    .as_ref()
                    .and_then(|p| p.get("requestId"))
                    .cloned()
                    .unwrap_or(Value::Null);
                debug!(%request_id, "client cancelled request");
            }
            other => warn!(method = %other, "ignoring unknown notification"),
        }
    }

    /// Runs one tool outside of JSON-RPC framing.
    ///
    /// Upstream failures come back as an `isError` result, like over MCP;
    /// unknown tools and bad arguments are errors.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolsCallResult, ToolError> {
        tools_call::run_tool(&self.context(), name, arguments).await
    }

    /// Definitions of every tool, as announced by `tools/list`.
    pub fn tool_definitions(&self) -> Vec<McpToolDefinition> {
        tools_list::definitions()
    }

    fn context(&self) -> ToolContext<'_> {
        ToolContext {
            api: self.api.as_ref(),
            settings: &self.settings,
            today: (self.today)(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedreg_client::InMemoryApi;
    use serde_json::json;

    fn handler() -> McpHandler {
        McpHandler::new(Arc::new(InMemoryApi::new()), ToolSettings::default())
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let req = JsonRpcRequest::new(RequestId::Number(1), "resources/list", None);
        match handler().dispatch(&req).await {
            JsonRpcOutput::Error(e) => assert_eq!(e.error.code, error_codes::METHOD_NOT_FOUND),
            JsonRpcOutput::Success(_) => panic!("expected error"),
        }
    }

    #[tokio::test]
    async fn output_serializes_without_wrapper() {
        let req = JsonRpcRequest::new(RequestId::String("a".into()), methods::PING, None);
        let out = handler().dispatch(&req).await;
        assert_eq!(out.id(), &RequestId::String("a".into()));
        let v: Value = serde_json::from_str(&out.to_json().expect("ser")).expect("de");
        assert_eq!(v, json!({"jsonrpc": "2.0", "id": "a", "result": {}}));
    }

    #[test]
    fn notifications_are_accepted_silently() {
        let h = handler();
        h.handle_notification(&JsonRpcNotification::new(
            methods::NOTIFICATION_CANCELLED,
            Some(json!({"requestId": 4})),
        ));
        h.handle_notification(&JsonRpcNotification::new("notifications/unknown", None));
    }
}

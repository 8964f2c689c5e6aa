//! Axum router for the MCP HTTP transport.
//!
//! Routes: `POST /mcp` (requests and notifications), `DELETE /mcp`
//! (session termination), `GET /health` (liveness and session count).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use fedreg_mcp::{JsonRpcOutput, McpHandler};
use fedreg_protocol::mcp::methods;
use fedreg_protocol::{error_codes, Incoming};

use crate::auth;
use crate::session::SessionRegistry;

/// Header carrying the session id, in both directions.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP request dispatcher.
    pub handler: Arc<McpHandler>,
    /// Optional Bearer token (None = no authentication required).
    pub token: Option<String>,
    /// Live client sessions.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// State with an empty session registry.
    pub fn new(handler: Arc<McpHandler>, token: Option<String>) -> Self {
        Self {
            handler,
            token,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        match self.token.as_deref() {
            Some(token) => auth::validate_bearer(headers, token).map_err(|status| {
                (status, Json(json!({"error": "unauthorized"}))).into_response()
            }),
            None => Ok(()),
        }
    }
}

/// Builds the axum `Router` with all MCP routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp).delete(handle_delete))
        .route("/health", get(handle_health))
        .with_state(state)
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "fedreg",
        "sessions": state.sessions.count().await,
    }))
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

async fn handle_mcp(State(state): State<AppState>, headers: HeaderMap, body: String) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    let message: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "unparseable request body");
            return json_rpc_error(
                StatusCode::OK,
                Value::Null,
                error_codes::PARSE_ERROR,
                "Parse error",
            );
        }
    };

    let session = session_id(&headers);
    let raw_id = message.get("id").cloned().unwrap_or(Value::Null);

    let request = match Incoming::from_value(message) {
        Ok(Incoming::Request(request)) => request,
        Ok(Incoming::Notification(notification)) => {
            if let Some(id) = session {
                if !state.sessions.touch(id).await {
                    return unknown_session(Value::Null);
                }
            }
            state.handler.handle_notification(&notification);
            return StatusCode::ACCEPTED.into_response();
        }
        Err(e) => {
            warn!(error = %e, "not a JSON-RPC message");
            return json_rpc_error(
                StatusCode::OK,
                raw_id,
                error_codes::INVALID_REQUEST,
                &format!("Invalid request: {e}"),
            );
        }
    };

    match session {
        Some(id) => {
            if !state.sessions.touch(id).await {
                return unknown_session(raw_id);
            }
        }
        None if request.method == methods::INITIALIZE => {}
        None => {
            return json_rpc_error(
                StatusCode::BAD_REQUEST,
                raw_id,
                error_codes::INVALID_REQUEST,
                "Mcp-Session-Id header is required",
            )
        }
    }

    let output = state.handler.dispatch(&request).await;

    // Only an `initialize` without a session header gets this far unsessioned.
    let opened = match (session, &output) {
        (None, JsonRpcOutput::Success(_)) => Some(state.sessions.create().await),
        _ => None,
    };

    let json_str = match output.to_json() {
        Ok(s) => s,
        Err(e) => {
            return json_rpc_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                raw_id,
                error_codes::INTERNAL_ERROR,
                &e.to_string(),
            )
        }
    };

    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json_str,
    )
        .into_response();
    if let Some(id) = opened {
        match id.parse() {
            Ok(value) => {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(SESSION_HEADER), value);
            }
            Err(e) => warn!(error = %e, "session id is not a valid header value"),
        }
    }
    response
}

async fn handle_delete(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }
    match session_id(&headers) {
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Mcp-Session-Id header is required"})),
        )
            .into_response(),
        Some(id) if state.sessions.remove(id).await => StatusCode::NO_CONTENT.into_response(),
        Some(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "unknown session"})),
        )
            .into_response(),
    }
}

fn unknown_session(id: Value) -> Response {
    json_rpc_error(
        StatusCode::NOT_FOUND,
        id,
        error_codes::INVALID_REQUEST,
        "Session not found or already closed",
    )
}

fn json_rpc_error(status: StatusCode, id: Value, code: i32, message: &str) -> Response {
    let body = json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    });
    (status, Json(body)).into_response()
}

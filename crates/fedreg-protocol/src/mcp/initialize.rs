//! `initialize` handshake payloads and protocol version negotiation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Capabilities a client declares. None of them change how this
/// server answers, so they are kept as an opaque map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientCapabilities {
    #[serde(flatten)]
    pub declared: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapability {
    /// Whether the server emits `notifications/tools/list_changed`.
    pub list_changed: bool,
}

/// What the server offers; only tools here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapability>,
}

/// Name and version of either peer (`clientInfo` / `serverInfo`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

pub type ClientInfo = Implementation;
pub type ServerInfo = Implementation;

/// `initialize` params.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Version the client would like to speak.
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: ClientCapabilities,
    pub client_info: ClientInfo,
}

/// `initialize` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Version the session will use; see [`negotiate_version`].
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
    /// Usage hints surfaced to the assistant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// MCP protocol version preferred by this implementation.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Protocol versions this server can speak, oldest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

/// Picks the version to answer with: the client's if supported,
/// otherwise our preferred one (the client decides whether to proceed).
pub fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|v| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|s| **s == v))
        .copied()
        .unwrap_or(PROTOCOL_VERSION)
}

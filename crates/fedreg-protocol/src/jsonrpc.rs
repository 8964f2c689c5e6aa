//! JSON-RPC 2.0 envelopes spoken by both transports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of the `jsonrpc` member on every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// A call that expects an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Answer carrying a `result`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// Echo of the request's id.
    pub id: RequestId,
    pub result: Value,
}

/// Answer carrying an `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: String,
    /// Echo of the request's id, or `0` when it could not be read.
    pub id: RequestId,
    pub error: JsonRpcError,
}

/// The `error` member of an error answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// One of [`error_codes`].
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request ids are numbers or strings; `null` ids mark notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

/// A one-way message; never answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A decoded inbound message.
#[derive(Debug, Clone)]
pub enum Incoming {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

impl Incoming {
    /// Classifies an already parsed JSON value.
    ///
    /// A present, non-null `id` makes the message a request; anything
    /// else is read as a notification.
    ///
    /// # Errors
    ///
    /// Fails when the value lacks the members of the chosen shape.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.get("id").is_some_and(|id| !id.is_null()) {
            serde_json::from_value(value).map(Self::Request)
        } else {
            serde_json::from_value(value).map(Self::Notification)
        }
    }

    pub fn method(&self) -> &str {
        match self {
            Self::Request(r) => &r.method,
            Self::Notification(n) => &n.method,
        }
    }
}

/// Error codes reserved by JSON-RPC 2.0.
pub mod error_codes {
    /// The payload is not JSON.
    pub const PARSE_ERROR: i32 = -32700;
    /// JSON, but not a request object.
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Arguments missing, mistyped or out of range.
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcResponse {
    /// Answers `id` with `result`.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        }
    }
}

impl JsonRpcErrorResponse {
    /// Answers `id` with an error object and no data.
    pub fn error(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcError {
                code,
                message: message.into(),
                data: None,
            },
        }
    }

    /// Attaches structured data to the error object.
    pub fn with_data(mut self, data: Value) -> Self {
        self.error.data = Some(data);
        self
    }
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_with_data_serializes_data() {
        let err = JsonRpcErrorResponse::error(RequestId::Number(3), error_codes::INVALID_PARAMS, "bad")
            .with_data(json!({"tool": "get_document"}));
        let v = serde_json::to_value(&err).expect("ser");
        assert_eq!(v["error"]["data"]["tool"], "get_document");
    }

    #[test]
    fn error_without_data_omits_key() {
        let err = JsonRpcErrorResponse::error(RequestId::Number(3), error_codes::INTERNAL_ERROR, "x");
        let v = serde_json::to_value(&err).expect("ser");
        assert!(v["error"].get("data").is_none());
    }

    #[test]
    fn request_id_display() {
        assert_eq!(RequestId::Number(7).to_string(), "7");
        assert_eq!(RequestId::String("abc".into()).to_string(), "abc");
    }

    #[test]
    fn incoming_with_id_is_request() {
        let msg = Incoming::from_value(json!({"jsonrpc": "2.0", "id": "r1", "method": "ping"}))
            .expect("request");
        assert!(matches!(&msg, Incoming::Request(r) if r.id == RequestId::String("r1".into())));
        assert_eq!(msg.method(), "ping");
    }

    #[test]
    fn incoming_with_null_or_missing_id_is_notification() {
        for value in [
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": null, "method": "notifications/initialized"}),
        ] {
            let msg = Incoming::from_value(value).expect("notification");
            assert!(matches!(msg, Incoming::Notification(_)));
        }
    }

    #[test]
    fn incoming_without_method_is_rejected() {
        assert!(Incoming::from_value(json!({"jsonrpc": "2.0", "id": 1})).is_err());
        assert!(Incoming::from_value(json!([1, 2])).is_err());
    }
}

//! Property-based tests for JSON-RPC deserialization.
//!
//! The parser must never panic on arbitrary input, and well-formed
//! `tools/call` requests must round-trip through serde.

use fedreg_protocol::jsonrpc::JsonRpcRequest;
use fedreg_protocol::mcp::tools::ToolsCallParams;
use proptest::prelude::*;

proptest! {
    /// Arbitrary strings never cause a panic.
    #[test]
    fn no_panic_on_arbitrary_json(input in "\\PC{0,256}") {
        let _ = serde_json::from_str::<JsonRpcRequest>(&input);
        let _ = serde_json::from_str::<ToolsCallParams>(&input);
    }

    /// Well-formed tool calls round-trip with their arguments intact.
    #[test]
    fn tool_call_roundtrips(
        tool in "[a-z_]{1,32}",
        number in "[0-9]{4}-[0-9]{5}",
        id in any::<i64>(),
    ) {
        let json = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": {"name": tool, "arguments": {"document_number": number}},
        });
        let parsed: Result<JsonRpcRequest, _> = serde_json::from_value(json);
        prop_assert!(parsed.is_ok(), "rejected valid request");

        let req = parsed.expect("test: already checked");
        let reparsed: JsonRpcRequest =
            serde_json::from_str(&serde_json::to_string(&req).expect("ser")).expect("de");
        let params: ToolsCallParams =
            serde_json::from_value(reparsed.params.expect("params")).expect("call params");
        prop_assert_eq!(params.name, tool);
        prop_assert_eq!(params.arguments["document_number"].as_str(), Some(number.as_str()));
    }

    /// Missing "method" field causes parse failure.
    #[test]
    fn missing_method_field_fails(id in 1i64..1000) {
        let json = format!(r#"{{"jsonrpc":"2.0","id":{id}}}"#);
        prop_assert!(serde_json::from_str::<JsonRpcRequest>(&json).is_err());
    }

    /// Missing "id" field causes parse failure.
    #[test]
    fn missing_id_field_fails(method in "[a-z]{2,16}") {
        let json = format!(r#"{{"jsonrpc":"2.0","method":"{method}"}}"#);
        prop_assert!(serde_json::from_str::<JsonRpcRequest>(&json).is_err());
    }
}

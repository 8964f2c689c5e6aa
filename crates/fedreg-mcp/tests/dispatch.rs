//! MCP dispatch tests against an in-memory Federal Register.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Value};

use fedreg_client::{ConditionValue, InMemoryApi};
use fedreg_mcp::{JsonRpcOutput, McpHandler, ToolError, ToolSettings};
use fedreg_protocol::mcp::methods;
use fedreg_protocol::{error_codes, JsonRpcRequest, RequestId};
use fedreg_types::{Agency, Document};

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 31).expect("date")
}

fn eo(number: u64, title: &str) -> Document {
    Document {
        document_number: Some(format!("2025-{number:05}")),
        title: Some(title.into()),
        executive_order_number: Some(number),
        raw_text_url: Some(format!("https://fr.test/eo/{number}.txt")),
        ..Document::default()
    }
}

fn api() -> InMemoryApi {
    InMemoryApi::new()
        .with_document(Document {
            document_number: Some("2025-01234".into()),
            title: Some("Clean Water Act Section 401 Certification".into()),
            summary: Some("Updates certification procedures.".into()),
            ..Document::default()
        })
        .with_document(eo(14148, "Initial Rescissions of Harmful Executive Orders"))
        .with_document(eo(14151, "Ending Radical Government DEI Programs"))
        .with_text("https://fr.test/eo/14151.txt", "By the authority vested in me...")
        .with_agency(Agency {
            id: 145,
            name: "Environmental Protection Agency".into(),
            short_name: Some("EPA".into()),
            slug: "environmental-protection-agency".into(),
            description: Some("A long description.".into()),
            ..Agency::default()
        })
}

fn handler_with(api: Arc<InMemoryApi>) -> McpHandler {
    McpHandler::new(api, ToolSettings::default()).with_clock(fixed_today)
}

fn handler() -> McpHandler {
    handler_with(Arc::new(api()))
}

fn rpc(method: &str, id: i64, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest::new(RequestId::Number(id), method, params)
}

async fn call(handler: &McpHandler, name: &str, arguments: Value) -> Value {
    let req = rpc(
        methods::TOOLS_CALL,
        1,
        Some(json!({"name": name, "arguments": arguments})),
    );
    let json_str = handler.dispatch(&req).await.to_json().expect("ser");
    serde_json::from_str(&json_str).expect("de")
}

fn text_of(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content")
}

#[tokio::test]
async fn initialize_then_list_tools() {
    let h = handler();
    let init = h
        .dispatch(&rpc(
            methods::INITIALIZE,
            1,
            Some(json!({
                "protocolVersion": "2025-06-18",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "1"}
            })),
        ))
        .await;
    let JsonRpcOutput::Success(init) = init else {
        panic!("initialize failed");
    };
    assert_eq!(init.result["protocolVersion"], "2025-06-18");

    let list = h.dispatch(&rpc(methods::TOOLS_LIST, 2, None)).await;
    let JsonRpcOutput::Success(list) = list else {
        panic!("tools/list failed");
    };
    let names: Vec<&str> = list.result["tools"]
        .as_array()
        .expect("tools")
        .iter()
        .map(|t| t["name"].as_str().expect("name"))
        .collect();
    for expected in [
        "search_documents",
        "get_document",
        "get_executive_order",
        "get_recent_executive_orders",
        "list_agencies",
        "get_public_inspection_current",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn get_document_returns_pretty_json() {
    let response = call(&handler(), "get_document", json!({"document_number": "2025-01234"})).await;
    assert_eq!(response["result"]["isError"], false);
    let doc: Value = serde_json::from_str(text_of(&response)).expect("json payload");
    assert_eq!(doc["title"], "Clean Water Act Section 401 Certification");
    assert_eq!(doc["abstract"], "Updates certification procedures.");
}

#[tokio::test]
async fn missing_document_is_text_not_error() {
    let response = call(&handler(), "get_document", json!({"document_number": "1999-00001"})).await;
    assert_eq!(response["result"]["isError"], false);
    assert!(text_of(&response).contains("not found"));
}

#[tokio::test]
async fn unknown_tool_is_invalid_params() {
    let response = call(&handler(), "delete_everything", json!({})).await;
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
    assert_eq!(response["error"]["data"]["tool"], "delete_everything");
}

#[tokio::test]
async fn missing_required_argument_is_invalid_params() {
    let response = call(&handler(), "get_document", json!({})).await;
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
    assert!(response["error"]["message"]
        .as_str()
        .expect("msg")
        .contains("document_number"));
}

#[tokio::test]
async fn wrong_argument_type_is_invalid_params() {
    let response = call(&handler(), "get_executive_order", json!({"executive_order_number": "14151"})).await;
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn enum_violation_is_invalid_params() {
    let response = call(&handler(), "search_documents", json!({"document_types": ["MEMO"]})).await;
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn tools_call_without_params_is_invalid_params() {
    let output = handler().dispatch(&rpc(methods::TOOLS_CALL, 9, None)).await;
    assert!(matches!(output, JsonRpcOutput::Error(e) if e.error.code == error_codes::INVALID_PARAMS));
}

#[tokio::test]
async fn executive_order_lookup_and_text() {
    let h = handler();
    let found = call(&h, "get_executive_order", json!({"executive_order_number": 14148})).await;
    let doc: Value = serde_json::from_str(text_of(&found)).expect("json");
    assert_eq!(doc["executive_order_number"], 14148);

    let missing = call(&h, "get_executive_order", json!({"executive_order_number": 99})).await;
    assert!(text_of(&missing).contains("executive order 99 not found"));

    let full = call(&h, "get_executive_order_text", json!({"executive_order_number": 14151})).await;
    let payload: Value = serde_json::from_str(text_of(&full)).expect("json");
    assert_eq!(payload["text"], "By the authority vested in me...");
}

#[tokio::test]
async fn recent_executive_orders_use_injected_clock() {
    let api = Arc::new(api());
    let h = handler_with(api.clone());
    call(&h, "get_recent_executive_orders", json!({})).await;

    let queries = api.recorded_queries();
    let query = queries.last().expect("query");
    assert_eq!(
        query.conditions.get("signing_date"),
        Some(&ConditionValue::Nested(vec![("gte".into(), "2025-03-01".into())]))
    );
}

#[tokio::test]
async fn recent_documents_default_to_seven_days() {
    let api = Arc::new(api());
    let h = handler_with(api.clone());
    call(&h, "get_recent_documents", json!({"agencies": ["environmental-protection-agency"]})).await;

    let qs = api.recorded_queries().last().expect("query").to_query_string();
    assert!(qs.starts_with("conditions[publication_date][gte]=2025-03-24"));
    assert!(qs.contains("conditions[agencies][]=environmental-protection-agency"));
}

#[tokio::test]
async fn search_documents_uses_default_fields_and_page_size() {
    let api = Arc::new(api());
    let h = handler_with(api.clone());
    let response = call(&h, "search_documents", json!({"term": "water"})).await;
    let envelope: Value = serde_json::from_str(text_of(&response)).expect("json");
    assert_eq!(envelope["count"], 1);

    let query = api.recorded_queries().pop().expect("query");
    assert_eq!(query.per_page, Some(20));
    assert!(query.fields.iter().any(|f| f == "document_number"));
}

#[tokio::test]
async fn search_all_documents_collects_across_pages() {
    let api = (0..45).fold(InMemoryApi::new(), |api, i| {
        api.with_document(Document {
            document_number: Some(format!("2024-{i:05}")),
            title: Some("Fisheries notice".into()),
            ..Document::default()
        })
    });
    let api = Arc::new(api);
    let settings = ToolSettings {
        limits: fedreg_client::PageLimits {
            max_per_page: 20,
            max_total_results: 2000,
        },
        ..ToolSettings::default()
    };
    let h = McpHandler::new(api.clone(), settings);

    let response = call(&h, "search_all_documents", json!({"term": "fisheries", "max_results": 30})).await;
    let envelope: Value = serde_json::from_str(text_of(&response)).expect("json");
    assert_eq!(envelope["results"].as_array().expect("results").len(), 30);
    assert_eq!(api.recorded_queries().len(), 2);
}

#[tokio::test]
async fn search_all_documents_sizes_pages_to_the_cap() {
    let api = Arc::new(api());
    let h = handler_with(api.clone());

    call(&h, "search_all_documents", json!({"max_results": 5})).await;
    let queries = api.recorded_queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].per_page, Some(5));

    call(&h, "search_all_documents", json!({"term": "water"})).await;
    assert_eq!(api.recorded_queries()[1].per_page, Some(100));
}

#[tokio::test]
async fn get_documents_lists_unknown_numbers() {
    let response = call(
        &handler(),
        "get_documents",
        json!({"document_numbers": ["2025-01234", "2025-99999"]}),
    )
    .await;
    let envelope: Value = serde_json::from_str(text_of(&response)).expect("json");
    assert_eq!(envelope["results"][0]["document_number"], "2025-01234");
    assert_eq!(envelope["errors"]["not_found"], json!(["2025-99999"]));
}

#[tokio::test]
async fn list_agencies_is_compact() {
    let response = call(&handler(), "list_agencies", Value::Null).await;
    let agencies: Value = serde_json::from_str(text_of(&response)).expect("json");
    assert_eq!(agencies[0]["slug"], "environmental-protection-agency");
    assert!(agencies[0].get("description").is_none());
}

#[tokio::test]
async fn upstream_failure_is_error_result() {
    let h = handler_with(Arc::new(InMemoryApi::new().failing_with(503)));
    let response = call(&h, "search_documents", json!({"term": "x"})).await;
    assert_eq!(response["result"]["isError"], true);
    assert!(text_of(&response).contains("HTTP 503"));
}

#[tokio::test]
async fn call_tool_outside_rpc() {
    let h = handler();
    let result = h
        .call_tool("get_agency", json!({"agency": "145"}))
        .await
        .expect("call");
    assert!(!result.is_error);
    assert!(result.joined_text().contains("EPA"));

    let err = h.call_tool("nope", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(_)));
}

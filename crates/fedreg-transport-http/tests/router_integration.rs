//! Integration tests for the HTTP router: session lifecycle, auth, health.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, Response, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use fedreg_client::InMemoryApi;
use fedreg_mcp::{McpHandler, ToolSettings};
use fedreg_transport_http::{build_router, AppState, SESSION_HEADER};
use fedreg_types::Document;

fn make_state(token: Option<&str>) -> AppState {
    let api = InMemoryApi::new().with_document(Document {
        document_number: Some("2025-01234".into()),
        title: Some("Clean Water Act Section 401 Certification".into()),
        ..Document::default()
    });
    let handler = McpHandler::new(Arc::new(api), ToolSettings::default());
    AppState::new(Arc::new(handler), token.map(String::from))
}

fn post(body: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json");
    if let Some(id) = session {
        builder = builder.header("Mcp-Session-Id", id);
    }
    builder.body(Body::from(body.to_string())).expect("req")
}

fn delete(session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri("/mcp");
    if let Some(id) = session {
        builder = builder.header("Mcp-Session-Id", id);
    }
    builder.body(Body::empty()).expect("req")
}

fn health() -> Request<Body> {
    Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("req")
}

async fn json_body(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1 << 20)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

const INITIALIZE: &str = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#;
const TOOLS_LIST: &str = r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#;

async fn open_session(app: &Router) -> String {
    let resp = app.clone().oneshot(post(INITIALIZE, None)).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("session header")
}

#[tokio::test]
async fn health_reports_zero_sessions_at_start() {
    let app = build_router(make_state(None));
    let resp = app.oneshot(health()).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"status": "ok", "service": "fedreg", "sessions": 0})
    );
}

#[tokio::test]
async fn initialize_creates_session() {
    let app = build_router(make_state(None));
    let resp = app.clone().oneshot(post(INITIALIZE, None)).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);

    let id = resp
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("session header");
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let body = json_body(resp).await;
    assert_eq!(body["result"]["serverInfo"]["name"], "fedreg");

    let health = json_body(app.oneshot(health()).await.expect("resp")).await;
    assert_eq!(health["sessions"], 1);
}

#[tokio::test]
async fn session_is_reused_across_requests() {
    let app = build_router(make_state(None));
    let id = open_session(&app).await;

    let resp = app
        .clone()
        .oneshot(post(TOOLS_LIST, Some(&id)))
        .await
        .expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(SESSION_HEADER).is_none());
    let body = json_body(resp).await;
    assert!(!body["result"]["tools"].as_array().expect("tools").is_empty());

    let call = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "search_documents", "arguments": {"term": "water"}}
    });
    let resp = app
        .clone()
        .oneshot(post(&call.to_string(), Some(&id)))
        .await
        .expect("resp");
    let body = json_body(resp).await;
    let text = body["result"]["content"][0]["text"].as_str().expect("text");
    assert!(text.contains("2025-01234"));

    let health = json_body(app.oneshot(health()).await.expect("resp")).await;
    assert_eq!(health["sessions"], 1);
}

#[tokio::test]
async fn request_without_session_is_bad_request() {
    let app = build_router(make_state(None));
    let resp = app.oneshot(post(TOOLS_LIST, None)).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["id"], 2);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = build_router(make_state(None));
    let resp = app
        .oneshot(post(TOOLS_LIST, Some("00000000-0000-4000-8000-000000000000")))
        .await
        .expect("resp");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notification_is_accepted_without_body() {
    let app = build_router(make_state(None));
    let id = open_session(&app).await;
    let resp = app
        .oneshot(post(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            Some(&id),
        ))
        .await
        .expect("resp");
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024)
        .await
        .expect("body");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn parse_error_has_null_id() {
    let app = build_router(make_state(None));
    let resp = app.oneshot(post("{not json", None)).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32700);
}

#[tokio::test]
async fn delete_ends_session() {
    let app = build_router(make_state(None));
    let id = open_session(&app).await;

    let resp = app.clone().oneshot(delete(Some(&id))).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.clone().oneshot(delete(Some(&id))).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(post(TOOLS_LIST, Some(&id)))
        .await
        .expect("resp");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let health = json_body(app.oneshot(health()).await.expect("resp")).await;
    assert_eq!(health["sessions"], 0);
}

#[tokio::test]
async fn delete_without_header_is_bad_request() {
    let app = build_router(make_state(None));
    let resp = app.oneshot(delete(None)).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn token_guards_mcp_but_not_health() {
    let app = build_router(make_state(Some("fr-token")));

    let resp = app.clone().oneshot(post(INITIALIZE, None)).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app.clone().oneshot(health()).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("authorization", "Bearer fr-token")
        .body(Body::from(INITIALIZE))
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(SESSION_HEADER));
}

#[tokio::test]
async fn concurrent_initializes_get_distinct_sessions() {
    let app = build_router(make_state(None));
    let (a, b) = tokio::join!(open_session(&app), open_session(&app));
    assert_ne!(a, b);
    let health = json_body(app.oneshot(health()).await.expect("resp")).await;
    assert_eq!(health["sessions"], 2);
}

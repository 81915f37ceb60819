mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{app_for, post_mcp};

const UNUSED_ENDPOINT: &str = "http://127.0.0.1:1/api/articles";

#[tokio::test]
async fn initialize_echoes_supported_protocol_version() {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "0.0.1" }
        }
    });
    let (status, response) = post_mcp(app_for(UNUSED_ENDPOINT), &request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response = response.unwrap();
    assert_eq!(response["id"], json!(1));
    assert_eq!(response["result"]["protocolVersion"], json!("2025-03-26"));
    assert_eq!(response["result"]["serverInfo"]["name"], json!("Zenn MCP Server"));
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn initialized_notification_is_accepted_without_body() {
    let request = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    let (status, response) = post_mcp(app_for(UNUSED_ENDPOINT), &request.to_string()).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(response.is_none());
}

#[tokio::test]
async fn tools_list_advertises_both_tools() {
    let request = json!({"jsonrpc": "2.0", "id": "list", "method": "tools/list"});
    let (status, response) = post_mcp(app_for(UNUSED_ENDPOINT), &request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response = response.unwrap();
    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|tool| tool["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["get_zenn_posts_by_username", "get_zenn_posts_by_topic"]);
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["username"]));
    assert_eq!(tools[1]["outputSchema"]["required"], json!(["articles"]));
}

#[tokio::test]
async fn ping_returns_empty_result() {
    let request = json!({"jsonrpc": "2.0", "id": 9, "method": "ping"});
    let (_, response) = post_mcp(app_for(UNUSED_ENDPOINT), &request.to_string()).await;
    assert_eq!(response.unwrap()["result"], json!({}));
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let request = json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"});
    let (status, response) = post_mcp(app_for(UNUSED_ENDPOINT), &request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.unwrap()["error"]["code"], json!(-32601));
}

#[tokio::test]
async fn unknown_tool_is_invalid_params() {
    let request = common::tool_call(3, "get_qiita_posts", json!({}));
    let (_, response) = post_mcp(app_for(UNUSED_ENDPOINT), &request).await;
    assert_eq!(response.unwrap()["error"]["code"], json!(-32602));
}

#[tokio::test]
async fn garbage_body_is_parse_error() {
    let (status, response) = post_mcp(app_for(UNUSED_ENDPOINT), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response = response.unwrap();
    assert_eq!(response["error"]["code"], json!(-32700));
    assert_eq!(response["id"], json!(null));
}

#[tokio::test]
async fn batch_is_invalid_request() {
    let body = json!([{"jsonrpc": "2.0", "id": 1, "method": "ping"}]).to_string();
    let (status, response) = post_mcp(app_for(UNUSED_ENDPOINT), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response.unwrap()["error"]["code"], json!(-32600));
}

#[tokio::test]
async fn get_on_mcp_path_is_not_allowed() {
    let request = Request::builder()
        .method("GET")
        .uri("/mcp")
        .header("accept", "text/event-stream")
        .body(Body::empty())
        .unwrap();
    let response = app_for(UNUSED_ENDPOINT).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn delete_on_mcp_path_is_not_allowed() {
    let request = Request::builder()
        .method("DELETE")
        .uri("/mcp")
        .body(Body::empty())
        .unwrap();
    let response = app_for(UNUSED_ENDPOINT).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn null_id_is_invalid_request() {
    let body = json!({"jsonrpc": "2.0", "id": null, "method": "ping"}).to_string();
    let (status, response) = post_mcp(app_for(UNUSED_ENDPOINT), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response.unwrap()["error"]["code"], json!(-32600));
}

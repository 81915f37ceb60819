//! Shared helpers: an httpmock stand-in for the Zenn API and a router driver.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use serde_json::Value;
use tower::ServiceExt;

use zenn_mcp::AppState;
use zenn_mcp::api::routes::create_router;
use zenn_mcp::config::Config;
use zenn_mcp::logging::Logger;

pub const ARTICLES_PATH: &str = "/api/articles";

pub struct ZennMockServer {
    server: MockServer,
}

impl ZennMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn endpoint(&self) -> String {
        self.server.url(ARTICLES_PATH)
    }

    pub fn app(&self) -> Router {
        app_for(&self.endpoint())
    }
}

pub fn app_for(endpoint: &str) -> Router {
    let config = Config::default().with_endpoint(endpoint);
    create_router(AppState::new(config, Logger::new("test")))
}

pub async fn post_mcp(app: Router, body: &str) -> (StatusCode, Option<Value>) {
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .header("accept", "application/json, text/event-stream")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };
    (status, json)
}

pub fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
    .to_string()
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::api::models::{
    INTERNAL_ERROR, INVALID_PARAMS, JSONRPC_VERSION, RpcError, RpcResponse,
};
use crate::error::AppError;

pub fn success(id: Value, result: Value) -> RpcResponse {
    RpcResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        result: Some(result),
        error: None,
    }
}

pub fn error(id: Value, code: i32, message: impl Into<String>) -> RpcResponse {
    RpcResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        result: None,
        error: Some(RpcError {
            code,
            message: message.into(),
        }),
    }
}

/// Tool output: the upstream body as both text and structured content.
pub fn tool_success(articles: Value) -> Value {
    json!({
        "content": [{ "type": "text", "text": articles.to_string() }],
        "structuredContent": articles,
        "isError": false
    })
}

pub fn tool_failure(err: &AppError) -> Value {
    json!({
        "content": [{ "type": "text", "text": err.to_string() }],
        "isError": true
    })
}

/// Maps a failed `tools/call` to either a tool result or a JSON-RPC error.
pub fn tool_call_outcome(id: Value, err: AppError) -> RpcResponse {
    if err.is_upstream() {
        return success(id, tool_failure(&err));
    }
    match err {
        AppError::InvalidParams(message) => error(id, INVALID_PARAMS, message),
        other => error(id, INTERNAL_ERROR, other.to_string()),
    }
}

pub fn reply(status: StatusCode, body: RpcResponse) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode as UpstreamStatus;

    #[test]
    fn upstream_failure_becomes_error_tool_result() {
        let err = AppError::UpstreamStatus {
            operation: "get_zenn_posts_by_username",
            status: UpstreamStatus::NOT_FOUND,
        };
        let response = tool_call_outcome(json!(7), err);
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert!(result["content"][0]["text"].as_str().unwrap().contains("404"));
    }

    #[test]
    fn invalid_params_becomes_rpc_error() {
        let response = tool_call_outcome(json!(1), AppError::InvalidParams("count must be at least 1".into()));
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[test]
    fn tool_success_keeps_body() {
        let body = json!({"articles": [{"id": 1, "title": "A"}]});
        let result = tool_success(body.clone());
        assert_eq!(result["structuredContent"], body);
        assert_eq!(result["content"][0]["text"], json!(body.to_string()));
    }
}

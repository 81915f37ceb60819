use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;
use crate::api::models::{
    CallToolParams, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
    JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR, RpcRequest, RpcResponse, ServerInfo,
    negotiate_protocol_version,
};
use crate::api::response;
use crate::config::MCP_PATH;

/// Stateless streamable-HTTP transport: POST only, no sessions, no server-push stream.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(MCP_PATH, post(mcp_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn mcp_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            state.logger.warn(&format!("Rejected unparsable message: {}", e));
            return response::reply(
                StatusCode::BAD_REQUEST,
                response::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)),
            );
        }
    };

    let request: RpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            state.logger.warn(&format!("Rejected invalid request: {}", e));
            return response::reply(
                StatusCode::BAD_REQUEST,
                response::error(Value::Null, INVALID_REQUEST, format!("Invalid request: {}", e)),
            );
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return response::reply(
            StatusCode::BAD_REQUEST,
            response::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ),
        );
    }

    if request.has_null_id() {
        return response::reply(
            StatusCode::BAD_REQUEST,
            response::error(Value::Null, INVALID_REQUEST, "Request id must not be null"),
        );
    }

    if request.is_notification() {
        state.logger.debug(&format!("Notification received: {}", request.method));
        return StatusCode::ACCEPTED.into_response();
    }

    let rpc_response = dispatch(&state, request).await;
    response::reply(StatusCode::OK, rpc_response)
}

pub async fn dispatch(state: &AppState, request: RpcRequest) -> RpcResponse {
    let id = request.id.unwrap_or(Value::Null);
    match request.method.as_str() {
        "initialize" => initialize(id, request.params),
        "ping" => response::success(id, json!({})),
        "tools/list" => response::success(id, json!({ "tools": state.tools.definitions() })),
        "tools/call" => call_tool(state, id, request.params).await,
        other => response::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
    }
}

fn initialize(id: Value, params: Value) -> RpcResponse {
    let params = match serde_json::from_value::<Option<InitializeParams>>(params) {
        Ok(params) => params.unwrap_or_default(),
        Err(e) => return response::error(id, INVALID_PARAMS, e.to_string()),
    };

    let result = InitializeResult {
        protocol_version: negotiate_protocol_version(params.protocol_version.as_deref()).to_string(),
        capabilities: json!({ "tools": { "listChanged": false } }),
        server_info: ServerInfo::current(),
    };

    match serde_json::to_value(result) {
        Ok(result) => response::success(id, result),
        Err(e) => response::error(id, INTERNAL_ERROR, e.to_string()),
    }
}

async fn call_tool(state: &AppState, id: Value, params: Value) -> RpcResponse {
    let params: CallToolParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => return response::error(id, INVALID_PARAMS, format!("Invalid tools/call params: {}", e)),
    };

    let arguments = params.arguments.unwrap_or_else(|| json!({}));
    match state.tools.call(&params.name, arguments).await {
        Ok(articles) => response::success(id, response::tool_success(articles)),
        Err(err) => {
            state.logger.warn(&format!("{} failed: {}", params.name, err));
            response::tool_call_outcome(id, err)
        }
    }
}

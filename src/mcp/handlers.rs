//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the method dispatcher: every inbound JSON-RPC
//! envelope is routed to exactly one of handshake, catalog listing, tool
//! invocation, notification acknowledgment, or an error response. Dispatch
//! is stateless; nothing carries over between requests.

use axum::{
    extract::rejection::JsonRejection, extract::State, http::StatusCode, response::IntoResponse,
    routing::post, Json, Router,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::coerce::{coerce_arguments, CoerceError};
use super::{helpers::*, models::*};
use crate::store::backend::StoreError;
use crate::store::state::{AppState, SharedState};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp))
        .route("/mcp", post(handle_mcp)) // Standard endpoint
        .route("/mcp/", post(handle_mcp)) // Trailing slash safety
}

/// Endpoint: POST /mcp
/// Handles one Model Context Protocol envelope per request.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Parse JSON-RPC Request
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "JSON parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    "Parse error",
                    None,
                )),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method = req.method;
    let params = req.params.unwrap_or(Value::Null);

    // Method names are matched case-insensitively; error payloads echo the
    // caller's original casing.
    let normalized = method.to_ascii_lowercase();

    tracing::debug!(method = %method, id = %id, "MCP call");

    // Notifications are acknowledged with an empty 200 and never an error,
    // whatever their payload looks like.
    if normalized.starts_with(NOTIFICATION_PREFIX) {
        tracing::debug!(method = %method, "notification acknowledged");
        return StatusCode::OK.into_response();
    }

    // Dispatch Method
    let response_body = match normalized.as_str() {
        "initialize" => rpc_success(id, handle_initialize()),
        "tools/list" => rpc_success(id, handle_tools_list(&state)),
        "tools/call" => handle_tools_call(&state, id, &method, &params).await,
        _ => {
            tracing::debug!(method = %method, "unknown method");
            rpc_error(
                id,
                error_codes::METHOD_NOT_FOUND,
                "Method not found",
                Some(json!(method)),
            )
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
///
/// No session object is opened; the response is pure capability metadata.
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Handles `tools/list` request.
fn handle_tools_list(state: &AppState) -> Value {
    json!({ "tools": state.catalog.to_json() })
}

/// Handles `tools/call` request: envelope-level concerns only, the tool
/// pipeline itself lives in [`handle_tool_call`].
async fn handle_tools_call(state: &AppState, id: Value, method: &str, params: &Value) -> Value {
    let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
        // A call without a tool name is treated exactly like an unknown
        // method on the wire.
        return rpc_error(
            id,
            error_codes::METHOD_NOT_FOUND,
            "Method not found",
            Some(json!(method)),
        );
    };

    let args = params.get("arguments").cloned().unwrap_or(Value::Null);

    match handle_tool_call(state, tool_name, args).await {
        Ok(payload) => rpc_success(id, text_content(payload)),
        Err(e) => {
            tracing::warn!(tool = tool_name, error = %e, "tool call failed");
            rpc_error(
                id,
                error_codes::INTERNAL_ERROR,
                "Internal error",
                Some(json!(e.to_string())),
            )
        }
    }
}

// =============================================================================
// Tool Invocation Pipeline
// =============================================================================

/// Failure anywhere in the tool-call pipeline. All variants surface as the
/// hard `-32603` envelope with the display text as diagnostic data; soft
/// errors never pass through here.
#[derive(Debug, Error)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Arguments(#[from] CoerceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handles a single tool invocation: catalog lookup, argument coercion, the
/// backing operation, and nothing else. Exported so tests can drive the
/// pipeline without an HTTP layer.
pub async fn handle_tool_call(
    state: &AppState,
    name: &str,
    args: Value,
) -> Result<Value, ToolCallError> {
    let tool = state
        .catalog
        .find(name)
        .ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;

    let empty = Map::new();
    let raw = args.as_object().unwrap_or(&empty);
    let typed = coerce_arguments(tool.params, raw)?;

    let reply = state.store.execute(tool.name, &typed).await?;
    Ok(reply.into_payload())
}

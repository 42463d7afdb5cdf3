//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC envelope construction
//! and the text-content wrapping convention for tool results.

use serde_json::{json, Value};

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC success envelope.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
/// * `data` – Optional diagnostic payload (offending method name, tool name,
///   or a short failure description).
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC error envelope.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>, data: Option<Value>) -> Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });

    if let Some(data) = data {
        error["data"] = data;
    }

    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error,
    })
}

/// Wraps a tool result payload into the MCP text-content shape.
///
/// Clients depend on `text` always being a string: structured payloads are
/// JSON-serialized, while payloads that are already strings pass through
/// unwrapped (no extra quoting). Errors never go through this wrapping.
pub fn text_content(result: Value) -> Value {
    let text = match result {
        Value::String(s) => s,
        other => other.to_string(),
    };

    json!({
        "content": [{ "type": "text", "text": text }],
    })
}

/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Use these helpers so every error frame has the same shape as the other server events.
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;

use crate::server::matchmaking::messages::ServerWsMessage;

/// Formats a WebSocket `error` event as a JSON string.
pub fn ws_error_message(message: &str) -> String {
    serde_json::to_string(&ServerWsMessage::error(message))
        .unwrap_or_else(|_| r#"{"action":"error","data":"Internal server error"}"#.to_string())
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "ORIGIN_NOT_ALLOWED").
/// - `message`: Human-readable error message.
/// - `status`: HTTP status code.
pub fn http_error_response(code: &str, message: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": { "code": code, "message": message }
    }))
}

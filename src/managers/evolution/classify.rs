use crate::errors::{ClassifiedError, ErrorCategory};
use crate::services::transport::TransportError;
use serde_json::Value;

const AUTH_FAILED_HINT: &str =
    "Please check your API key and ensure it has the necessary permissions";
const NOT_FOUND_HINT: &str = "Please verify your base URL and instance name are correct";
const BAD_REQUEST_HINT: &str = "Please check your request parameters. Phone number should include country code without + sign.";
const SERVER_ERROR_HINT: &str = "Evolution API server encountered an error. Please try again later.";
const UNKNOWN_HINT: &str = "Unknown error occurred";
const REQUEST_FAILED: &str = "Evolution API request failed";
const NETWORK_HINT: &str = "An unknown error occurred";

/// Reads a remote field the way a loosely typed client would: empty strings,
/// `null`, `false` and `0` count as absent; structured values are rendered as
/// JSON text.
fn remote_text(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Classifies a non-2xx response.
pub fn classify_response(status: u16, payload: &Value) -> ClassifiedError {
    let (category, message, description) = match status {
        401 => (
            ErrorCategory::AuthFailed,
            "Authentication failed".to_string(),
            AUTH_FAILED_HINT.to_string(),
        ),
        404 => (
            ErrorCategory::NotFound,
            "Resource not found".to_string(),
            NOT_FOUND_HINT.to_string(),
        ),
        400 => (
            ErrorCategory::BadRequest,
            "Bad request".to_string(),
            remote_text(payload, "message").unwrap_or_else(|| BAD_REQUEST_HINT.to_string()),
        ),
        500 => (
            ErrorCategory::ServerError,
            "Server error".to_string(),
            SERVER_ERROR_HINT.to_string(),
        ),
        other => (
            ErrorCategory::Unknown,
            remote_text(payload, "message").unwrap_or_else(|| format!("HTTP {} Error", other)),
            remote_text(payload, "error").unwrap_or_else(|| UNKNOWN_HINT.to_string()),
        ),
    };
    ClassifiedError {
        category,
        message,
        description,
        http_code: Some(status.to_string()),
        original_payload: (!payload.is_null()).then(|| payload.clone()),
    }
}

/// Classifies a failure that never produced a response.
pub fn classify_transport_failure(err: &TransportError) -> ClassifiedError {
    let detail = err.to_string();
    ClassifiedError {
        category: ErrorCategory::Unknown,
        message: REQUEST_FAILED.to_string(),
        description: if detail.trim().is_empty() {
            NETWORK_HINT.to_string()
        } else {
            detail
        },
        http_code: None,
        original_payload: None,
    }
}

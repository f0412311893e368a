use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    AuthFailed,
    NotFound,
    BadRequest,
    ServerError,
    Unknown,
}

/// A remote or transport failure normalized into a user-facing message.
///
/// `http_code` is `None` only when the transport never produced a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    pub message: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_payload: Option<Value>,
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.http_code {
            Some(code) => write!(f, "{} (HTTP {}): {}", self.message, code, self.description),
            None => write!(f, "{}: {}", self.message, self.description),
        }
    }
}

impl std::error::Error for ClassifiedError {}

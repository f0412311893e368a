use serde::Serialize;
use std::fmt;

use super::tool_error::{ToolError, ToolErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    RemoteFailure = -32000,
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct McpError {
    pub code: ErrorCode,
    pub message: String,
}

impl McpError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Renders a tool failure as a multi-line error the calling agent can read.
    pub fn from_tool_error(tool: &str, error: &ToolError) -> Self {
        let mut lines = vec![
            "EvolutionApiError".to_string(),
            format!("tool: {}", tool),
            format!("code: {}", error.code),
            format!("message: {}", error.message),
        ];
        if let Some(description) = &error.description {
            lines.push(format!("description: {}", description));
        }
        if let Some(http_code) = &error.http_code {
            lines.push(format!("http_code: {}", http_code));
        }
        let message = lines.join("\n");

        let code = match error.kind {
            ToolErrorKind::InvalidParams | ToolErrorKind::UnsupportedOperation => {
                ErrorCode::InvalidParams
            }
            ToolErrorKind::MissingCredentials => ErrorCode::InvalidRequest,
            ToolErrorKind::Internal => ErrorCode::InternalError,
            _ => ErrorCode::RemoteFailure,
        };
        McpError::new(code, message)
    }
}

impl fmt::Display for McpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for McpError {}

use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

use super::classified::{ClassifiedError, ErrorCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    InvalidParams,
    UnsupportedOperation,
    MissingCredentials,
    AuthFailed,
    NotFound,
    BadRequest,
    ServerError,
    NetworkFailure,
    Unknown,
    Internal,
}

impl ToolErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ToolErrorKind::InvalidParams => "INVALID_PARAMS",
            ToolErrorKind::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            ToolErrorKind::MissingCredentials => "MISSING_CREDENTIALS",
            ToolErrorKind::AuthFailed => "AUTH_FAILED",
            ToolErrorKind::NotFound => "NOT_FOUND",
            ToolErrorKind::BadRequest => "BAD_REQUEST",
            ToolErrorKind::ServerError => "SERVER_ERROR",
            ToolErrorKind::NetworkFailure => "NETWORK_FAILURE",
            ToolErrorKind::Unknown => "UNKNOWN",
            ToolErrorKind::Internal => "INTERNAL",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "httpCode", skip_serializing_if = "Option::is_none")]
    pub http_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.code().to_string(),
            message: message.into(),
            description: None,
            http_code: None,
            details: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_http_code(mut self, http_code: impl Into<String>) -> Self {
        self.http_code = Some(http_code.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidParams, message)
    }

    pub fn unsupported_operation(operation: &str) -> Self {
        Self::new(
            ToolErrorKind::UnsupportedOperation,
            format!("The operation \"{}\" is not supported", operation),
        )
    }

    pub fn missing_credentials() -> Self {
        Self::new(
            ToolErrorKind::MissingCredentials,
            "No Evolution API credentials found",
        )
        .with_description("Please configure Evolution API credentials in the node settings")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, message)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::String(self.message.clone()))
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ToolError {}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::internal(err.to_string())
    }
}

impl From<ClassifiedError> for ToolError {
    fn from(err: ClassifiedError) -> Self {
        let kind = match err.category {
            ErrorCategory::AuthFailed => ToolErrorKind::AuthFailed,
            ErrorCategory::NotFound => ToolErrorKind::NotFound,
            ErrorCategory::BadRequest => ToolErrorKind::BadRequest,
            ErrorCategory::ServerError => ToolErrorKind::ServerError,
            ErrorCategory::Unknown if err.http_code.is_none() => ToolErrorKind::NetworkFailure,
            ErrorCategory::Unknown => ToolErrorKind::Unknown,
        };
        let mut out = ToolError::new(kind, err.message).with_description(err.description);
        if let Some(http_code) = err.http_code {
            out = out.with_http_code(http_code);
        }
        if let Some(payload) = err.original_payload {
            out = out.with_details(payload);
        }
        out
    }
}

use crate::errors::ToolError;
use crate::services::validation::Validation;
use crate::utils::phone::format_phone_number;
use crate::utils::tool_errors::unknown_operation_error;
use serde_json::{Map, Value};
use std::fmt;

pub const OPERATIONS: &[&str] = &[
    "sendTextMessage",
    "sendMediaMessage",
    "checkConnection",
    "getProfile",
];

const MEDIA_TYPES: &[&str] = &["image", "document", "audio"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    SendTextMessage,
    SendMediaMessage,
    CheckConnection,
    GetProfile,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::SendTextMessage => "sendTextMessage",
            OperationKind::SendMediaMessage => "sendMediaMessage",
            OperationKind::CheckConnection => "checkConnection",
            OperationKind::GetProfile => "getProfile",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        match raw.trim() {
            "sendTextMessage" => Ok(OperationKind::SendTextMessage),
            "sendMediaMessage" => Ok(OperationKind::SendMediaMessage),
            "checkConnection" => Ok(OperationKind::CheckConnection),
            "getProfile" => Ok(OperationKind::GetProfile),
            other => Err(unknown_operation_error(other, OPERATIONS)),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaMessage {
    Image {
        url: String,
        caption: Option<String>,
    },
    Document {
        url: String,
        filename: Option<String>,
        caption: Option<String>,
    },
    Audio {
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SendText { number: String, text: String },
    SendMedia { number: String, media: MediaMessage },
    CheckConnection,
    GetProfile { number: String },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::SendText { .. } => OperationKind::SendTextMessage,
            Operation::SendMedia { .. } => OperationKind::SendMediaMessage,
            Operation::CheckConnection => OperationKind::CheckConnection,
            Operation::GetProfile { .. } => OperationKind::GetProfile,
        }
    }
}

/// Parameter values for one input item, keyed by the node's parameter names.
#[derive(Debug, Clone, Default)]
pub struct ItemParameters {
    values: Map<String, Value>,
}

impl ItemParameters {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Item values win over `defaults`.
    pub fn with_defaults(defaults: &Map<String, Value>, item: &Map<String, Value>) -> Self {
        let mut values = defaults.clone();
        for (key, value) in item {
            values.insert(key.clone(), value.clone());
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Raw operation name; the node defaults to `sendTextMessage`.
    pub fn operation_name(&self) -> String {
        self.values
            .get("operation")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| OperationKind::SendTextMessage.as_str().to_string())
    }
}

/// Turns item parameters into a typed operation. Unknown operations fail here,
/// before any credential lookup or network call.
pub struct OperationParser<'a> {
    validation: &'a Validation,
    normalize_phone: bool,
}

impl<'a> OperationParser<'a> {
    pub fn new(validation: &'a Validation, normalize_phone: bool) -> Self {
        Self {
            validation,
            normalize_phone,
        }
    }

    pub fn parse(&self, params: &ItemParameters) -> Result<Operation, ToolError> {
        let kind = OperationKind::parse(&params.operation_name())?;
        match kind {
            OperationKind::SendTextMessage => Ok(Operation::SendText {
                number: self.phone_number(params)?,
                text: self.required(params, "messageText", false)?,
            }),
            OperationKind::SendMediaMessage => {
                let number = self.phone_number(params)?;
                let media = self.media(params)?;
                Ok(Operation::SendMedia { number, media })
            }
            OperationKind::CheckConnection => Ok(Operation::CheckConnection),
            OperationKind::GetProfile => Ok(Operation::GetProfile {
                number: self.phone_number(params)?,
            }),
        }
    }

    fn required(
        &self,
        params: &ItemParameters,
        name: &str,
        trim: bool,
    ) -> Result<String, ToolError> {
        self.validation
            .ensure_string(params.get(name).unwrap_or(&Value::Null), name, trim)
    }

    fn optional(&self, params: &ItemParameters, name: &str) -> Result<Option<String>, ToolError> {
        self.validation.ensure_optional_string(params.get(name), name)
    }

    fn phone_number(&self, params: &ItemParameters) -> Result<String, ToolError> {
        let raw = self.required(params, "phoneNumber", false)?;
        if self.normalize_phone {
            return format_phone_number(&raw);
        }
        Ok(raw)
    }

    fn media(&self, params: &ItemParameters) -> Result<MediaMessage, ToolError> {
        let media_type = self
            .optional(params, "mediaType")?
            .unwrap_or_else(|| "image".to_string());
        let url = self.required(params, "mediaUrl", true)?;
        let caption = self.optional(params, "caption")?;
        match media_type.trim() {
            "image" => Ok(MediaMessage::Image { url, caption }),
            "document" => Ok(MediaMessage::Document {
                url,
                filename: self.optional(params, "filename")?,
                caption,
            }),
            "audio" => Ok(MediaMessage::Audio { url }),
            other => Err(ToolError::invalid_params(format!(
                "Unsupported media type: {}",
                other
            ))
            .with_description(format!("Use one of: {}.", MEDIA_TYPES.join(", ")))),
        }
    }
}

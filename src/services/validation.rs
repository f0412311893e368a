use crate::constants::network::ALLOWED_SCHEMES;
use crate::errors::ToolError;
use serde_json::Value;
use url::Url;

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(
        &self,
        value: &Value,
        label: &str,
        trim: bool,
    ) -> Result<String, ToolError> {
        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(ToolError::invalid_params(format!(
                    "{} must be a non-empty string",
                    label
                )))
            }
        };
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(if trim {
            normalized.to_string()
        } else {
            text
        })
    }

    /// Absent, null and blank values all collapse to `None`.
    pub fn ensure_optional_string(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<String>, ToolError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
            Some(val) => self.ensure_string(val, label, false).map(Some),
        }
    }

    pub fn ensure_base_url(&self, raw: &str) -> Result<Url, ToolError> {
        let parsed = Url::parse(raw.trim()).map_err(|_| {
            ToolError::invalid_params(format!("Invalid base URL: {}", raw))
                .with_description("Expected something like https://evolution-api.yourdomain.com")
        })?;
        if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return Err(ToolError::invalid_params(
                "Only http/https base URLs are supported",
            ));
        }
        Ok(parsed)
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

use crate::constants::network::TIMEOUT_API_REQUEST_MS;
use crate::constants::tool::{ENV_DESCRIPTION, ENV_TIMEOUT_MS};
use crate::utils::paths::normalize_env_value;
use serde_json::Value;

pub fn is_truthy(value: impl AsRef<str>) -> bool {
    matches!(
        value.as_ref().trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Accepts JSON booleans and the usual truthy strings.
pub fn value_is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => is_truthy(text),
        Some(Value::Number(n)) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        _ => false,
    }
}

pub fn resolve_request_timeout_ms() -> u64 {
    normalize_env_value(std::env::var(ENV_TIMEOUT_MS).ok())
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(TIMEOUT_API_REQUEST_MS)
}

pub fn resolve_tool_description_override() -> Option<String> {
    normalize_env_value(std::env::var(ENV_DESCRIPTION).ok())
}

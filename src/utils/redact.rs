use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

const DEFAULT_REDACTION: &str = "[REDACTED]";
const INLINE_REDACTION: &str = "***REDACTED***";
const MIN_SECRET_LEN: usize = 6;

static SENSITIVE_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "apikey",
        "api_key",
        "api-key",
        "authorization",
        "password",
        "secret",
        "token",
        "access_token",
    ]
    .into_iter()
    .collect()
});

static INLINE_REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~-]{10,})\b").expect("inline redaction regex"),
            "$1 ***REDACTED***",
        ),
        (
            Regex::new(r#"(?i)\b(apikey|api[_-]key|token|secret)\b\s*([:=])\s*([^\s"'`,}]+)"#)
                .expect("inline redaction regex"),
            "$1$2***REDACTED***",
        ),
    ]
});

pub fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    SENSITIVE_KEYS.contains(normalized.as_str()) || normalized.contains("secret")
}

/// Masks known credential shapes inside free text, plus any literal secret
/// the caller knows about (e.g. the configured API key).
pub fn redact_text(value: &str, known_secrets: &[&str]) -> String {
    let mut out = value.to_string();
    for (re, replacement) in INLINE_REDACTION_PATTERNS.iter() {
        if re.is_match(&out) {
            out = re.replace_all(&out, *replacement).to_string();
        }
    }
    for secret in known_secrets {
        let needle = secret.trim();
        if needle.len() < MIN_SECRET_LEN {
            continue;
        }
        out = out.replace(needle, INLINE_REDACTION);
    }
    out
}

pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(redact_text(text, &[])),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, entry)| {
                    let redacted = if is_sensitive_key(key) {
                        Value::String(DEFAULT_REDACTION.to_string())
                    } else {
                        redact_value(entry)
                    };
                    (key.clone(), redacted)
                })
                .collect(),
        ),
        _ => value.clone(),
    }
}

use serde_json::Value;

fn field_set(response: &Value, key: &str) -> bool {
    match response.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

/// Heuristic over the gateway's loose response envelopes. Unknown shapes
/// count as success.
pub fn looks_successful(response: &Value) -> bool {
    if response.is_null() {
        return false;
    }
    let status = response.get("status").and_then(Value::as_str);
    if field_set(response, "key") || field_set(response, "message") || status == Some("success") {
        return true;
    }
    if field_set(response, "error") || status == Some("error") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::looks_successful;
    use serde_json::json;

    #[test]
    fn message_key_marks_success_even_with_error_field() {
        assert!(looks_successful(&json!({"key": {"id": "A1"}, "error": null})));
    }

    #[test]
    fn error_envelopes_are_flagged() {
        assert!(!looks_successful(&json!({"status": "error", "reason": "x"})));
        assert!(!looks_successful(&json!({"error": "boom", "message": ""})));
        assert!(!looks_successful(&json!(null)));
    }

    #[test]
    fn unknown_shapes_default_to_success() {
        assert!(looks_successful(&json!({"instance": {"state": "open"}})));
        assert!(looks_successful(&json!([1, 2, 3])));
    }
}

use crate::errors::ToolError;
use crate::utils::suggest::suggest;

pub fn unknown_operation_error(operation: &str, known_operations: &[&str]) -> ToolError {
    let suggestions = suggest(operation, known_operations, 3);
    let mut hint = format!("Use one of: {}.", known_operations.join(", "));
    if !suggestions.is_empty() {
        hint = format!("Did you mean: {}? {}", suggestions.join(", "), hint);
    }
    ToolError::unsupported_operation(operation)
        .with_description(hint)
        .with_details(serde_json::json!({
            "known_operations": known_operations,
            "did_you_mean": suggestions,
        }))
}

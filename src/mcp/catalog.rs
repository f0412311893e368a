use crate::constants::tool::TOOL_NAME;
use crate::errors::{ErrorCode, McpError};
use crate::utils::feature_flags::resolve_tool_description_override;
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

const MAX_REPORTED_ERRORS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

static TOOL_CATALOG: Lazy<Vec<ToolDef>> = Lazy::new(|| {
    let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tool_catalog.json"));
    serde_json::from_str(raw).expect("tool_catalog.json must be valid JSON")
});

static TOOL_VALIDATORS: Lazy<HashMap<String, JSONSchema>> = Lazy::new(|| {
    TOOL_CATALOG
        .iter()
        .filter_map(|tool| {
            JSONSchema::compile(&tool.input_schema)
                .ok()
                .map(|schema| (tool.name.clone(), schema))
        })
        .collect()
});

pub fn tool_catalog() -> &'static Vec<ToolDef> {
    &TOOL_CATALOG
}

pub fn tool_by_name(name: &str) -> Option<&'static ToolDef> {
    TOOL_CATALOG.iter().find(|tool| tool.name == name)
}

/// Catalog as published by `tools/list`. The main tool's description can be
/// replaced so the calling agent knows when to reach for it.
pub fn list_tools() -> Vec<ToolDef> {
    let description_override = resolve_tool_description_override();
    TOOL_CATALOG
        .iter()
        .cloned()
        .map(|mut tool| {
            if tool.name == TOOL_NAME {
                if let Some(description) = description_override.clone() {
                    tool.description = description;
                }
            }
            tool
        })
        .collect()
}

pub fn validate_tool_args(tool_name: &str, args: &Value) -> Result<(), McpError> {
    let Some(schema) = TOOL_VALIDATORS.get(tool_name) else {
        return Ok(());
    };
    let subject = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args.clone()
    };
    if let Err(errors) = schema.validate(&subject) {
        let mut lines = vec![format!("Invalid arguments for {}", tool_name)];
        for err in errors.take(MAX_REPORTED_ERRORS) {
            let path = err.instance_path.to_string();
            let location = if path.is_empty() { "(root)" } else { path.as_str() };
            lines.push(format!("{}: {}", location, err));
        }
        return Err(McpError::new(ErrorCode::InvalidParams, lines.join("\n")));
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_schemas_all_compile() {
        for tool in tool_catalog() {
            assert!(
                TOOL_VALIDATORS.contains_key(&tool.name),
                "schema for {} must compile",
                tool.name
            );
        }
    }

    #[test]
    fn accepts_single_item_and_batch_shapes() {
        assert!(validate_tool_args(
            "evolution_api",
            &json!({"operation": "sendTextMessage", "phoneNumber": "5511999999999", "messageText": "hi"})
        )
        .is_ok());
        assert!(validate_tool_args(
            "evolution_api",
            &json!({
                "operation": "getProfile",
                "continueOnFail": true,
                "items": [{"phoneNumber": "5511999999999"}, {"phoneNumber": 5511888888888u64}]
            })
        )
        .is_ok());
        assert!(validate_tool_args("evolution_api", &Value::Null).is_ok());
    }

    #[test]
    fn rejects_unknown_fields_and_media_types() {
        let err = validate_tool_args("evolution_api", &json!({"phone": "1"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.contains("Invalid arguments for evolution_api"));

        assert!(validate_tool_args(
            "evolution_api",
            &json!({"items": [{"mediaType": "video"}]})
        )
        .is_err());
    }

    #[test]
    fn unknown_operation_names_pass_schema_validation() {
        assert!(validate_tool_args("evolution_api", &json!({"operation": "deleteInstance"})).is_ok());
    }

    #[test]
    fn unknown_tools_are_not_validated_here() {
        assert!(validate_tool_args("nope", &json!({"x": 1})).is_ok());
        assert!(tool_by_name("nope").is_none());
        assert!(tool_by_name("evolution_credentials").is_some());
    }
}

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::utils::suggest::suggest;

use serde_json::Value;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, args: Value) -> Result<Value, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn unknown_tool(&self, tool: &str) -> ToolError {
        let known = self.handler_names();
        let suggestions = suggest(tool, &known, 3);
        let mut err = ToolError::invalid_params(format!("Unknown tool: {}", tool))
            .with_details(serde_json::json!({"known_tools": known}));
        if !suggestions.is_empty() {
            err = err.with_description(format!("Did you mean: {}?", suggestions.join(", ")));
        }
        err
    }

    pub async fn execute(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        let handler = self
            .handlers
            .get(tool)
            .cloned()
            .ok_or_else(|| self.unknown_tool(tool))?;

        self.logger.debug(
            "tool call started",
            Some(&serde_json::json!({"tool": tool, "args": args})),
        );
        let started = Instant::now();
        let result = handler.handle(args).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => self.logger.info(
                "tool call finished",
                Some(&serde_json::json!({"tool": tool, "duration_ms": duration_ms})),
            ),
            Err(err) => self.logger.warn(
                "tool call failed",
                Some(&serde_json::json!({
                    "tool": tool,
                    "duration_ms": duration_ms,
                    "code": err.code,
                    "message": err.message,
                })),
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn handle(&self, args: Value) -> Result<Value, ToolError> {
            Ok(args)
        }
    }

    fn executor() -> ToolExecutor {
        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert("evolution_api".to_string(), Arc::new(Echo));
        ToolExecutor::new(Logger::new("test"), handlers)
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let out = executor()
            .execute("evolution_api", serde_json::json!({"x": 1}))
            .await
            .unwrap();
        assert_eq!(out["x"], 1);
    }

    #[tokio::test]
    async fn unknown_tool_suggests_close_name() {
        let err = executor()
            .execute("evolution_apii", Value::Null)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
        assert_eq!(err.description.as_deref(), Some("Did you mean: evolution_api?"));
    }
}

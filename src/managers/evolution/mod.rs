pub mod batch;
pub mod classify;
pub mod client;
pub mod operation;
pub mod request;
pub mod url;

use crate::constants::credentials::CREDENTIAL_NAME;
use crate::errors::ToolError;
use crate::services::credentials::{ConnectionConfig, CredentialStore};
use crate::services::logger::Logger;
use crate::services::transport::HttpTransport;
use crate::services::validation::Validation;
use crate::utils::feature_flags::value_is_truthy;
use batch::{run_batch, FailurePolicy, ItemResult};
use client::EvolutionClient;
use operation::{ItemParameters, OperationParser};
use request::build_call;
use serde_json::{Map, Value};
use std::sync::Arc;

const CONTROL_FIELDS: &[&str] = &["items", "continueOnFail", "normalizePhoneNumber"];
const CREDENTIAL_ACTIONS: &[&str] = &["test", "status"];

/// Per-invocation switches supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionSettings {
    pub failure_policy: FailurePolicy,
    pub normalize_phone: bool,
}

#[derive(Clone)]
pub struct EvolutionManager {
    logger: Logger,
    validation: Validation,
    credentials: Arc<dyn CredentialStore>,
    client: EvolutionClient,
}

impl EvolutionManager {
    pub fn new(
        logger: Logger,
        validation: Validation,
        credentials: Arc<dyn CredentialStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let logger = logger.child("evolution");
        Self {
            client: EvolutionClient::new(logger.clone(), validation.clone(), transport),
            logger,
            validation,
            credentials,
        }
    }

    async fn connection_config(&self) -> Result<Option<ConnectionConfig>, ToolError> {
        self.credentials.credentials(CREDENTIAL_NAME).await
    }

    /// Runs every item through build → request, sequentially.
    pub async fn execute(
        &self,
        items: Vec<ItemParameters>,
        settings: ExecutionSettings,
    ) -> Result<Vec<Value>, ToolError> {
        // Fetched once; a lookup failure belongs to each item, not to the batch.
        let config = self.connection_config().await;
        match &config {
            Ok(None) => self
                .logger
                .warn("no usable evolutionApi credentials configured", None),
            Err(err) => self.logger.error(
                "credential lookup failed",
                Some(&serde_json::json!({"code": err.code, "message": err.message})),
            ),
            Ok(Some(_)) => {}
        }
        let parser = OperationParser::new(&self.validation, settings.normalize_phone);
        let config = &config;
        let items = &items;
        let parser = &parser;

        self.logger.info(
            "executing batch",
            Some(&serde_json::json!({
                "items": items.len(),
                "continue_on_fail": settings.failure_policy == FailurePolicy::ContinueOnFail,
            })),
        );

        run_batch(items.len(), settings.failure_policy, |index| async move {
            let params = &items[index];
            let operation = params.operation_name();
            let outcome = match (parser.parse(params), config) {
                (Err(err), _) => Err(err),
                (Ok(_), Err(err)) => Err(err.clone()),
                (Ok(parsed), Ok(config)) => {
                    self.client
                        .request(config.as_ref(), &build_call(&parsed))
                        .await
                }
            };
            if let Err(err) = &outcome {
                self.logger.warn(
                    "item failed",
                    Some(&serde_json::json!({
                        "item": index,
                        "operation": operation,
                        "code": err.code,
                    })),
                );
            }
            ItemResult { operation, outcome }
        })
        .await
    }

    /// Tool entry point. Top-level parameters describe one item, or act as
    /// defaults for each entry of `items`.
    pub async fn handle_action(&self, args: Value) -> Result<Value, ToolError> {
        let obj = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(ToolError::invalid_params("Arguments must be an object")),
        };
        let settings = ExecutionSettings {
            failure_policy: FailurePolicy::from_flag(value_is_truthy(obj.get("continueOnFail"))),
            normalize_phone: value_is_truthy(obj.get("normalizePhoneNumber")),
        };
        let defaults: Map<String, Value> = obj
            .iter()
            .filter(|(key, _)| !CONTROL_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let items = match obj.get("items") {
            None | Some(Value::Null) => vec![ItemParameters::new(defaults)],
            Some(Value::Array(entries)) => {
                if entries.is_empty() {
                    return Err(ToolError::invalid_params("items must not be empty"));
                }
                entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        entry
                            .as_object()
                            .map(|item| ItemParameters::with_defaults(&defaults, item))
                            .ok_or_else(|| {
                                ToolError::invalid_params(format!(
                                    "items[{}] must be an object",
                                    index
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            Some(_) => return Err(ToolError::invalid_params("items must be an array")),
        };

        let results = self.execute(items, settings).await?;
        let success = results
            .iter()
            .all(|entry| entry.get("success").and_then(Value::as_bool) == Some(true));
        Ok(serde_json::json!({"success": success, "results": results}))
    }

    pub async fn handle_credentials_action(&self, args: Value) -> Result<Value, ToolError> {
        let action = args
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or("test");
        match action {
            "test" => {
                let config = self.connection_config().await?;
                Ok(self.client.test_credentials(config.as_ref()).await)
            }
            "status" => {
                let config = self.connection_config().await?;
                Ok(match config {
                    Some(config) => serde_json::json!({
                        "configured": true,
                        "credential": CREDENTIAL_NAME,
                        "baseUrl": config.base_url,
                        "instanceName": config.instance_name,
                        "apiKey": "[REDACTED]",
                    }),
                    None => serde_json::json!({
                        "configured": false,
                        "credential": CREDENTIAL_NAME,
                    }),
                })
            }
            other => Err(ToolError::invalid_params(format!(
                "Unknown credentials action: {}",
                other
            ))
            .with_description(format!("Use one of: {}.", CREDENTIAL_ACTIONS.join(", ")))),
        }
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for EvolutionManager {
    async fn handle(&self, args: Value) -> Result<Value, ToolError> {
        self.handle_action(args).await
    }
}

/// Exposes the credential checks as their own tool.
pub struct CredentialsTool(pub Arc<EvolutionManager>);

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for CredentialsTool {
    async fn handle(&self, args: Value) -> Result<Value, ToolError> {
        self.0.handle_credentials_action(args).await
    }
}

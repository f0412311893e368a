use crate::constants::tool::{CREDENTIALS_TOOL_NAME, TOOL_NAME};
use crate::errors::ToolError;
use crate::managers::evolution::{CredentialsTool, EvolutionManager};
use crate::mcp::catalog::tool_catalog;
use crate::services::credentials::{CredentialStore, LayeredCredentialStore};
use crate::services::logger::Logger;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::transport::{HttpTransport, ReqwestTransport};
use crate::services::validation::Validation;
use crate::utils::feature_flags::resolve_request_timeout_ms;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub tool_executor: Arc<ToolExecutor>,
    pub evolution_manager: Arc<EvolutionManager>,
}

impl App {
    fn validate_tool_wiring(
        handlers: &HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_description(
                "Every tool in tool_catalog.json must have a registered handler",
            )
            .with_details(serde_json::json!({ "missing_tools": missing })))
    }

    /// Production wiring: credentials from file then environment, reqwest transport.
    pub fn initialize() -> Result<Self, ToolError> {
        let logger = Logger::new("evolution-tool");
        let transport = Arc::new(ReqwestTransport::new(resolve_request_timeout_ms())?);
        let credentials = Arc::new(LayeredCredentialStore::from_env());
        Self::with_components(logger, credentials, transport)
    }

    pub fn with_components(
        logger: Logger,
        credentials: Arc<dyn CredentialStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ToolError> {
        let evolution_manager = Arc::new(EvolutionManager::new(
            logger.clone(),
            Validation::new(),
            credentials,
            transport,
        ));

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert(TOOL_NAME.to_string(), evolution_manager.clone());
        handlers.insert(
            CREDENTIALS_TOOL_NAME.to_string(),
            Arc::new(CredentialsTool(evolution_manager.clone())),
        );
        Self::validate_tool_wiring(&handlers)?;

        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));
        Ok(Self {
            logger,
            tool_executor,
            evolution_manager,
        })
    }
}

use super::classify::{classify_response, classify_transport_failure};
use super::request::OutboundCall;
use super::url::build_url;
use crate::constants::endpoints;
use crate::constants::headers::{API_KEY, CONTENT_TYPE_JSON};
use crate::errors::ToolError;
use crate::services::credentials::ConnectionConfig;
use crate::services::logger::Logger;
use crate::services::transport::{HttpMethod, HttpRequest, HttpTransport};
use crate::services::validation::Validation;
use crate::utils::redact::redact_text;
use crate::utils::response::looks_successful;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Performs a single gateway call and turns every failure into a classified
/// `ToolError`. Never retries.
#[derive(Clone)]
pub struct EvolutionClient {
    logger: Logger,
    validation: Validation,
    transport: Arc<dyn HttpTransport>,
}

impl EvolutionClient {
    pub fn new(logger: Logger, validation: Validation, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            logger: logger.child("client"),
            validation,
            transport,
        }
    }

    fn auth_headers(config: &ConnectionConfig) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
            (API_KEY.to_string(), config.api_key.clone()),
        ]
    }

    pub async fn request(
        &self,
        config: Option<&ConnectionConfig>,
        call: &OutboundCall,
    ) -> Result<Value, ToolError> {
        self.exchange(config, call).await.map(|(_, body)| body)
    }

    /// Like `request`, but also yields the HTTP status of a successful call.
    async fn exchange(
        &self,
        config: Option<&ConnectionConfig>,
        call: &OutboundCall,
    ) -> Result<(u16, Value), ToolError> {
        let config = config
            .filter(|config| config.is_complete())
            .ok_or_else(ToolError::missing_credentials)?;
        self.validation.ensure_base_url(&config.base_url)?;

        let url = build_url(&config.base_url, &config.instance_name, call.path);
        let request = HttpRequest {
            method: call.method,
            url: url.clone(),
            headers: Self::auth_headers(config),
            body: call.body.clone().map(Value::Object),
        };
        self.logger.debug(
            "sending request",
            Some(&serde_json::json!({"method": call.method.as_str(), "url": url})),
        );

        let started = Instant::now();
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                let classified = classify_transport_failure(&err);
                self.logger.error(
                    "request failed without response",
                    Some(&serde_json::json!({
                        "url": url,
                        "error": redact_text(&classified.description, &[&config.api_key]),
                    })),
                );
                return Err(classified.into());
            }
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        if !response.is_success() {
            let classified = classify_response(response.status, &response.body);
            self.logger.warn(
                "request rejected",
                Some(&serde_json::json!({
                    "url": url,
                    "status": response.status,
                    "message": classified.message,
                    "duration_ms": duration_ms,
                })),
            );
            return Err(classified.into());
        }

        if !looks_successful(&response.body) {
            self.logger.warn(
                "gateway returned an error-shaped payload with a success status",
                Some(&serde_json::json!({"url": url, "status": response.status})),
            );
        }
        self.logger.debug(
            "request completed",
            Some(&serde_json::json!({"status": response.status, "duration_ms": duration_ms})),
        );
        Ok((response.status, response.body))
    }

    /// Probes the configured instance with `GET /instance/connectionState/{instance}`.
    pub async fn test_credentials(&self, config: Option<&ConnectionConfig>) -> Value {
        let call = OutboundCall {
            method: HttpMethod::Get,
            path: endpoints::CONNECTION_STATE,
            body: None,
        };
        match self.exchange(config, &call).await {
            Ok((status, result)) => {
                serde_json::json!({"success": true, "status": status, "result": result})
            }
            Err(err) => {
                let status = err
                    .http_code
                    .as_deref()
                    .and_then(|code| code.parse::<u16>().ok());
                serde_json::json!({"success": false, "status": status, "error": err.to_value()})
            }
        }
    }
}

use crate::constants::credentials::{ENV_API_KEY, ENV_BASE_URL, ENV_INSTANCE};
use crate::errors::ToolError;
use crate::utils::paths::{normalize_env_value, resolve_credentials_path};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Address and auth for one gateway instance, read-only for a whole batch.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub base_url: String,
    #[serde(default)]
    pub instance_name: String,
    pub api_key: String,
}

impl ConnectionConfig {
    pub fn new(
        base_url: impl Into<String>,
        instance_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            instance_name: instance_name.into(),
            api_key: api_key.into(),
        }
    }

    /// Instance may legitimately be empty; the URL builder then skips suffixing.
    pub fn is_complete(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    pub fn instance(&self) -> Option<&str> {
        let trimmed = self.instance_name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("instance_name", &self.instance_name)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn credentials(&self, name: &str) -> Result<Option<ConnectionConfig>, ToolError>;
}

#[derive(Default, Clone)]
pub struct StaticCredentialStore {
    entries: HashMap<String, ConnectionConfig>,
}

impl StaticCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, config: ConnectionConfig) -> Self {
        self.entries.insert(name.to_string(), config);
        self
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn credentials(&self, name: &str) -> Result<Option<ConnectionConfig>, ToolError> {
        Ok(self
            .entries
            .get(name)
            .filter(|config| config.is_complete())
            .cloned())
    }
}

/// JSON file keyed by credential name:
/// `{"evolutionApi": {"baseUrl": "...", "apiKey": "...", "instanceName": "..."}}`.
/// Re-read on every lookup so edits apply without a restart.
#[derive(Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        Self::new(resolve_credentials_path())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn credentials(&self, name: &str) -> Result<Option<ConnectionConfig>, ToolError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(ToolError::internal(format!(
                    "Failed to read credentials file {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };
        let parsed: Value = serde_json::from_str(&raw).map_err(|err| {
            ToolError::invalid_params(format!("Failed to parse credentials file: {}", err))
        })?;
        let obj = parsed
            .as_object()
            .ok_or_else(|| ToolError::invalid_params("Credentials file must be a JSON object"))?;
        let Some(entry) = obj.get(name) else {
            return Ok(None);
        };
        let config: ConnectionConfig = serde_json::from_value(entry.clone()).map_err(|err| {
            ToolError::invalid_params(format!("Credential '{}' has invalid format: {}", name, err))
        })?;
        Ok(config.is_complete().then_some(config))
    }
}

/// `EVOLUTION_API_BASE_URL`, `EVOLUTION_API_KEY`, `EVOLUTION_API_INSTANCE`.
/// Serves any credential name.
#[derive(Clone, Default)]
pub struct EnvCredentialStore;

#[async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn credentials(&self, _name: &str) -> Result<Option<ConnectionConfig>, ToolError> {
        let read = |key: &str| normalize_env_value(std::env::var(key).ok());
        let (Some(base_url), Some(api_key)) = (read(ENV_BASE_URL), read(ENV_API_KEY)) else {
            return Ok(None);
        };
        Ok(Some(ConnectionConfig::new(
            base_url,
            read(ENV_INSTANCE).unwrap_or_default(),
            api_key,
        )))
    }
}

/// First store that yields a complete config wins.
#[derive(Clone, Default)]
pub struct LayeredCredentialStore {
    layers: Vec<Arc<dyn CredentialStore>>,
}

impl LayeredCredentialStore {
    pub fn new(layers: Vec<Arc<dyn CredentialStore>>) -> Self {
        Self { layers }
    }

    pub fn from_env() -> Self {
        Self::new(vec![
            Arc::new(FileCredentialStore::from_env()),
            Arc::new(EnvCredentialStore),
        ])
    }
}

#[async_trait]
impl CredentialStore for LayeredCredentialStore {
    async fn credentials(&self, name: &str) -> Result<Option<ConnectionConfig>, ToolError> {
        for layer in &self.layers {
            if let Some(config) = layer.credentials(name).await? {
                return Ok(Some(config));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_api_key() {
        let config = ConnectionConfig::new("https://x.com", "inst1", "super-secret-key");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("inst1"));
    }

    #[test]
    fn deserializes_host_field_names() {
        let config: ConnectionConfig = serde_json::from_value(serde_json::json!({
            "baseUrl": "https://x.com/",
            "apiKey": "k",
            "instanceName": "inst1",
        }))
        .unwrap();
        assert_eq!(config.base_url, "https://x.com/");
        assert_eq!(config.instance(), Some("inst1"));
    }

    #[tokio::test]
    async fn static_store_skips_incomplete_entries() {
        let store = StaticCredentialStore::new()
            .with("evolutionApi", ConnectionConfig::new("https://x.com", "", " "));
        assert!(store.credentials("evolutionApi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn layered_store_falls_through_to_next_layer() {
        let config = ConnectionConfig::new("https://x.com", "inst1", "k");
        let store = LayeredCredentialStore::new(vec![
            Arc::new(StaticCredentialStore::new()),
            Arc::new(StaticCredentialStore::new().with("evolutionApi", config.clone())),
        ]);
        assert_eq!(store.credentials("evolutionApi").await.unwrap(), Some(config));
        assert!(store.credentials("other").await.unwrap().is_none());
    }
}

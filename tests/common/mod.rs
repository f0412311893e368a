#![allow(dead_code)]

use async_trait::async_trait;
use evolution_tool::errors::ToolError;
use evolution_tool::managers::evolution::EvolutionManager;
use evolution_tool::services::credentials::{
    ConnectionConfig, CredentialStore, StaticCredentialStore,
};
use evolution_tool::services::logger::Logger;
use evolution_tool::services::transport::{
    HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use evolution_tool::services::validation::Validation;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub static ENV_LOCK: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

pub const BASE_URL: &str = "https://x.com/";
pub const INSTANCE: &str = "inst1";
pub const API_KEY: &str = "B6D711FCDE4D4FD5936544120E713976";

/// Records every request and replays scripted outcomes in order. Once the
/// script runs dry it answers `200 {"ok": true}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body }));
        self
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 200,
                    body: serde_json::json!({"ok": true}),
                })
            })
    }
}

pub fn connection() -> ConnectionConfig {
    ConnectionConfig::new(BASE_URL, INSTANCE, API_KEY)
}

pub fn configured_store() -> Arc<dyn CredentialStore> {
    Arc::new(StaticCredentialStore::new().with("evolutionApi", connection()))
}

pub fn empty_store() -> Arc<dyn CredentialStore> {
    Arc::new(StaticCredentialStore::new())
}

/// Every lookup fails, as a store backed by an unreadable file would.
pub struct BrokenStore;

#[async_trait]
impl CredentialStore for BrokenStore {
    async fn credentials(&self, _name: &str) -> Result<Option<ConnectionConfig>, ToolError> {
        Err(ToolError::invalid_params(
            "Failed to parse credentials file: EOF while parsing a list",
        ))
    }
}

pub fn broken_store() -> Arc<dyn CredentialStore> {
    Arc::new(BrokenStore)
}

pub fn manager(
    credentials: Arc<dyn CredentialStore>,
    transport: Arc<RecordingTransport>,
) -> EvolutionManager {
    EvolutionManager::new(
        Logger::new("test"),
        Validation::new(),
        credentials,
        transport,
    )
}

mod common;
use common::{manager, RecordingTransport, ENV_LOCK};

use evolution_tool::services::credentials::{
    ConnectionConfig, CredentialStore, EnvCredentialStore, FileCredentialStore,
    LayeredCredentialStore,
};
use serde_json::json;
use std::sync::Arc;

const ENV_KEYS: &[&str] = &[
    "EVOLUTION_API_BASE_URL",
    "EVOLUTION_API_KEY",
    "EVOLUTION_API_INSTANCE",
];

fn tmp_file(prefix: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}-{}.json", prefix, uuid::Uuid::new_v4()))
}

fn snapshot_env() -> Vec<(&'static str, Option<String>)> {
    ENV_KEYS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect()
}

fn restore_env(previous: Vec<(&'static str, Option<String>)>) {
    for (key, value) in previous {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

#[tokio::test]
async fn file_store_reads_named_credential() {
    let path = tmp_file("evolution-creds");
    std::fs::write(
        &path,
        r#"{"evolutionApi": {"baseUrl": "https://x.com/", "apiKey": "k-123456", "instanceName": "inst1"}}"#,
    )
    .unwrap();

    let store = FileCredentialStore::new(&path);
    let config = store.credentials("evolutionApi").await.unwrap();
    assert_eq!(
        config,
        Some(ConnectionConfig::new("https://x.com/", "inst1", "k-123456"))
    );
    assert!(store.credentials("somethingElse").await.unwrap().is_none());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn file_store_missing_file_is_not_an_error() {
    let store = FileCredentialStore::new(tmp_file("evolution-absent"));
    assert!(store.credentials("evolutionApi").await.unwrap().is_none());
}

#[tokio::test]
async fn file_store_rejects_malformed_json() {
    let path = tmp_file("evolution-bad");
    std::fs::write(&path, "[1, 2").unwrap();
    let store = FileCredentialStore::new(&path);
    assert!(store.credentials("evolutionApi").await.is_err());
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn env_store_requires_base_url_and_key() {
    let _guard = ENV_LOCK.lock().await;
    let previous = snapshot_env();

    std::env::set_var("EVOLUTION_API_BASE_URL", "https://env.example.com");
    std::env::remove_var("EVOLUTION_API_KEY");
    std::env::remove_var("EVOLUTION_API_INSTANCE");
    let missing_key = EnvCredentialStore.credentials("evolutionApi").await.unwrap();

    std::env::set_var("EVOLUTION_API_KEY", "env-key-123");
    let present = EnvCredentialStore.credentials("evolutionApi").await.unwrap();

    restore_env(previous);

    assert!(missing_key.is_none());
    let present = present.expect("env credentials");
    assert_eq!(present.base_url, "https://env.example.com");
    assert_eq!(present.instance(), None);
}

#[tokio::test]
async fn file_layer_takes_precedence_over_env() {
    let _guard = ENV_LOCK.lock().await;
    let previous = snapshot_env();
    std::env::set_var("EVOLUTION_API_BASE_URL", "https://env.example.com");
    std::env::set_var("EVOLUTION_API_KEY", "env-key-123");

    let path = tmp_file("evolution-layered");
    std::fs::write(
        &path,
        r#"{"evolutionApi": {"baseUrl": "https://file.example.com", "apiKey": "file-key", "instanceName": "inst1"}}"#,
    )
    .unwrap();

    let store = LayeredCredentialStore::new(vec![
        Arc::new(FileCredentialStore::new(&path)),
        Arc::new(EnvCredentialStore),
    ]);
    let from_file = store.credentials("evolutionApi").await.unwrap();

    let _ = std::fs::remove_file(&path);
    let from_env = store.credentials("evolutionApi").await.unwrap();

    restore_env(previous);

    assert_eq!(from_file.unwrap().base_url, "https://file.example.com");
    assert_eq!(from_env.unwrap().base_url, "https://env.example.com");
}

#[tokio::test]
async fn malformed_file_fails_each_item_without_aborting_the_batch() {
    let path = tmp_file("evolution-bad-batch");
    std::fs::write(&path, "[1, 2").unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let manager = manager(Arc::new(FileCredentialStore::new(&path)), transport.clone());

    let result = manager
        .handle_action(json!({
            "operation": "checkConnection",
            "continueOnFail": true,
            "items": [{}, {}, {}]
        }))
        .await;
    let _ = std::fs::remove_file(&path);

    let result = result.expect("per-item failures");
    let results = result["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|entry| entry["success"] == false));
    assert!(transport.requests().is_empty());
}

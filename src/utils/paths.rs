use std::env;
use std::path::{Path, PathBuf};

use crate::constants::credentials::ENV_CREDENTIALS_PATH;

pub(crate) fn normalize_env_value(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    if lowered == "undefined" || lowered == "null" {
        return None;
    }
    Some(trimmed.to_string())
}

pub fn expand_home_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    let home = env::var("HOME").ok();
    match (raw, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (other, Some(home)) if other.starts_with("~/") => PathBuf::from(home).join(&other[2..]),
        _ => path.to_path_buf(),
    }
}

fn resolve_config_dir() -> Option<PathBuf> {
    if let Some(dir) = normalize_env_value(env::var("XDG_CONFIG_HOME").ok()) {
        return Some(PathBuf::from(dir));
    }
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

pub fn resolve_credentials_path() -> PathBuf {
    if let Some(path) = normalize_env_value(env::var(ENV_CREDENTIALS_PATH).ok()) {
        return expand_home_path(path);
    }
    resolve_config_dir()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        .join("evolution-tool")
        .join("credentials.json")
}

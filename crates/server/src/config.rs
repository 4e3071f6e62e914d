use std::{collections::HashMap, fs, path::Path};

use dashboard::DEFAULT_CURRENCY_SYMBOL;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub database_url: String,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8050".into(),
            database_url: "sqlite://./lab_inventory.db".into(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the optional TOML file, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
            if let Some(v) = file_cfg.get("currency_symbol") {
                settings.currency_symbol = v.clone();
            }
        }
    }

    for key in ["DASHBOARD_BIND", "APP__BIND_ADDR"] {
        if let Some(v) = env(key) {
            settings.bind_addr = v;
        }
    }
    for key in ["DATABASE_URL", "APP__DATABASE_URL"] {
        if let Some(v) = env(key) {
            settings.database_url = v;
        }
    }
    if let Some(v) = env("APP__CURRENCY_SYMBOL") {
        settings.currency_symbol = v;
    }

    settings
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:") {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite://") {
        if is_windows_drive_path(path) {
            return format!("sqlite:{}", path.replace('\\', "/"));
        }
        return raw_database_url.to_string();
    }

    if raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        if is_windows_drive_path(&path) {
            return format!("sqlite:{path}");
        }
        return format!("sqlite://{path}");
    }

    let path = raw_database_url.replace('\\', "/");
    if is_windows_drive_path(&path) {
        return format!("sqlite:{path}");
    }
    format!("sqlite://{path}")
}

fn is_windows_drive_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};

use log::warn;

/// Which storage backend keeps the page state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Sqlite,
    File,
}

/// Application configuration, read from `linkplate.toml`. A missing or
/// malformed file falls back to the defaults; individual keys do the same.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend: Backend,
    /// Database file (sqlite) or state directory (file backend).
    pub storage_path: PathBuf,
    /// Log level hint for the embedding shell's logger.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            backend: Backend::Sqlite,
            storage_path: PathBuf::from("linkplate/state.db"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> AppConfig {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(_) => return AppConfig::default(),
        };
        let value: toml::Value = match text.parse() {
            Ok(v) => v,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path, e);
                return AppConfig::default();
            }
        };
        Self::from_value(&value)
    }

    fn from_value(value: &toml::Value) -> AppConfig {
        let storage = |key: &str| -> Option<&str> {
            value
                .get("storage")
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
        };

        let backend = match storage("backend") {
            Some("file") => Backend::File,
            _ => Backend::Sqlite,
        };
        let storage_path = storage("path").map(PathBuf::from).unwrap_or_else(|| match backend {
            Backend::Sqlite => PathBuf::from("linkplate/state.db"),
            Backend::File => PathBuf::from("linkplate/state"),
        });
        let log_level = value
            .get("log")
            .and_then(|l| l.get("level"))
            .and_then(|v| v.as_str())
            .unwrap_or("info")
            .to_string();

        AppConfig {
            backend,
            storage_path,
            log_level,
        }
    }

    /// Directory that must exist and be writable before the store opens.
    pub fn data_dir(&self) -> PathBuf {
        match self.backend {
            Backend::Sqlite => self
                .storage_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            Backend::File => self.storage_path.clone(),
        }
    }
}

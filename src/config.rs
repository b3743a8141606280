//! Bookshelf configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an
//! empty object (or no file at all) gives the stock setup: API on port
//! 3000, file-backed store under `./bookshelf_data`, client pointed at
//! `http://localhost:3000/api/books`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::storage::{BookStore, FileStore, MemoryStore, StorageResult};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root data directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "./bookshelf_data".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Open the configured store
    pub fn open_store(&self) -> StorageResult<Arc<dyn BookStore>> {
        Ok(match self.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::open(self.data_path())?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Collection URL the client talks to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000/api/books".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookshelfConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

impl BookshelfConfig {
    /// Load and validate configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: BookshelfConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }

        if self.storage.backend == StorageBackend::File && self.storage.data_dir.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "storage.data_dir is required for the file backend".to_string(),
            ));
        }

        let url = &self.client.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "client.base_url must be an http(s) URL, got '{}'",
                url
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BookshelfConfig::from_json("{}").unwrap();
        assert_eq!(config, BookshelfConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.client.base_url, "http://localhost:3000/api/books");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bookshelf.json");
        fs::write(
            &path,
            r#"{
                "server": { "port": 8080, "cors_origins": ["http://localhost:5173"] },
                "storage": { "backend": "memory" }
            }"#,
        )
        .unwrap();

        let config = BookshelfConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, "./bookshelf_data");
    }

    #[test]
    fn test_missing_file() {
        let err = BookshelfConfig::load(Path::new("/nonexistent/bookshelf.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_rejects_invalid_values() {
        for json in [
            r#"{"server": {"port": 0}}"#,
            r#"{"storage": {"backend": "file", "data_dir": " "}}"#,
            r#"{"client": {"base_url": "localhost:3000"}}"#,
        ] {
            let err = BookshelfConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
        }
        assert!(matches!(
            BookshelfConfig::from_json(r#"{"storage": {"backend": "mongo"}}"#).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_open_file_store_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StorageConfig {
            backend: StorageBackend::File,
            data_dir: temp_dir.path().join("db").to_string_lossy().into_owned(),
        };

        let store = storage.open_store().unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(temp_dir.path().join("db/data/books.dat").exists());
    }
}

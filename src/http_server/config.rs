//! Listener and CORS settings for the API server

use serde::{Deserialize, Serialize};

/// Port the book API listens on unless configured otherwise
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// `host:port`, as passed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_with_port() {
        assert_eq!(HttpServerConfig::with_port(8080).socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: HttpServerConfig =
            serde_json::from_str(r#"{"port": 4000, "cors_origins": ["http://a.test"]}"#).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert!(!config.allows_any_origin());
    }
}

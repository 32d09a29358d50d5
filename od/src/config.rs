//! OrderDispatch configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ipc::client::{DEFAULT_MAX_REQUEST_BYTES, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_TIMEOUT};
use crate::ipc::{OrderClient, get_socket_path};

/// Main OrderDispatch configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server socket settings
    pub server: ServerConfig,

    /// Client settings
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .orderdispatch.yml
        let local_config = PathBuf::from(".orderdispatch.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/orderdispatch/orderdispatch.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("orderdispatch").join("orderdispatch.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Socket path, falling back to the runtime directory
    pub fn socket_path(&self) -> PathBuf {
        self.server.socket_path.clone().unwrap_or_else(get_socket_path)
    }

    /// Build a client for the configured server
    pub fn client(&self) -> OrderClient {
        OrderClient::with_socket_path(self.socket_path())
            .with_timeout(self.client.timeout())
            .with_limits(self.server.max_request_bytes, self.client.max_response_bytes)
    }
}

/// Server socket configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Unix socket path (default: <runtime dir>/orderdispatch/od.sock)
    #[serde(rename = "socket-path")]
    pub socket_path: Option<PathBuf>,

    /// Largest request line the server accepts
    #[serde(rename = "max-request-bytes")]
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_path: None,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Connect/write/read timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Largest response line the client accepts
    #[serde(rename = "max-response-bytes")]
    pub max_response_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.socket_path, None);
        assert_eq!(config.server.max_request_bytes, 4096);
        assert_eq!(config.client.timeout_ms, 5000);
        assert_eq!(config.client.timeout(), Duration::from_secs(5));
        assert!(config.socket_path().ends_with("orderdispatch/od.sock"));
    }

    #[test]
    fn test_load_explicit_file_with_partial_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("od.yml");
        fs::write(
            &path,
            "server:\n  socket-path: /tmp/custom/od.sock\nclient:\n  timeout-ms: 250\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.socket_path(), PathBuf::from("/tmp/custom/od.sock"));
        assert_eq!(config.client.timeout(), Duration::from_millis(250));
        // Missing keys fall back to defaults
        assert_eq!(config.server.max_request_bytes, DEFAULT_MAX_REQUEST_BYTES);
        assert_eq!(config.client.max_response_bytes, DEFAULT_MAX_RESPONSE_BYTES);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_load_rejects_bad_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "server: [not, a, map]\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = Config {
            server: ServerConfig {
                socket_path: Some(PathBuf::from("/run/od.sock")),
                max_request_bytes: 1024,
            },
            client: ClientConfig {
                timeout_ms: 100,
                max_response_bytes: 2048,
            },
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("socket-path"));
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}

//! Configuration management for the audio tracker server
//!
//! Settings come from an optional JSON file, then the `AUDIO_TRACKER_ADDR`
//! environment variable, then command-line overrides applied by the binary.
//! A missing or unreadable file is not an error; defaults are used instead.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::ServerError;

/// Environment variable overriding `server.bind_addr`.
pub const ADDR_ENV_VAR: &str = "AUDIO_TRACKER_ADDR";

/// Default path checked by the binary when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "audio_tracker.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // All interfaces
            bind_addr: "0.0.0.0:9091".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        self.bind_addr
            .parse()
            .map_err(|err: std::net::AddrParseError| ServerError::InvalidAddress {
                value: self.bind_addr.clone(),
                reason: err.to_string(),
            })
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level, falling back to INFO for unknown names.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.level.parse::<tracing::Level>() {
            Ok(level) => level,
            Err(_) => {
                log::warn!(
                    "[Config] Unknown log level '{}', using info",
                    self.level
                );
                tracing::Level::INFO
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file doesn't exist or
    /// its JSON is invalid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load from `path` and apply the environment override.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let mut config = Self::load_from_file(path);
        config.apply_env_override(std::env::var(ADDR_ENV_VAR).ok());
        config
    }

    /// Replace the bind address when the environment provides one.
    pub fn apply_env_override(&mut self, addr: Option<String>) {
        if let Some(addr) = addr.filter(|value| !value.trim().is_empty()) {
            log::info!("[Config] {} overrides bind address with {}", ADDR_ENV_VAR, addr);
            self.server.bind_addr = addr;
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/marketdesk/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("marketdesk").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The gateway origin is an absolute http(s) URL
    /// - An absolute `api_base`, when given, is http(s) too
    /// - At least one redirect hop is allowed
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = self.gateway.origin.trim();
        if !is_http_url(origin) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "gateway.origin '{}' must start with http:// or https://",
                    self.gateway.origin
                ),
            });
        }

        if let Some(api_base) = &self.gateway.api_base {
            let api_base = api_base.trim();
            if !api_base.starts_with('/') && !is_http_url(api_base) {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "gateway.api_base '{}' must be an absolute URL or start with '/'",
                        api_base
                    ),
                });
            }
        }

        if self.navigation.max_redirects == 0 {
            return Err(ConfigError::ValidationError {
                message: "navigation.max_redirects must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

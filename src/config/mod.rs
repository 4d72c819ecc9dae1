//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the record store API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where UI preferences are persisted.
    #[serde(default = "default_prefs_path")]
    pub prefs_path: PathBuf,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_prefs_path() -> PathBuf {
    PathBuf::from("./mfstat-prefs.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            log_level: default_log_level(),
            prefs_path: default_prefs_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "log_level must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The API base URL, parsed and normalized with a trailing slash so
    /// joining endpoint paths behaves.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = if self.api_base_url.ends_with('/') {
            self.api_base_url.clone()
        } else {
            format!("{}/", self.api_base_url)
        };
        Url::parse(&raw).map_err(|e| {
            ConfigError::ValidationError(format!("invalid api_base_url '{}': {}", self.api_base_url, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.prefs_path, PathBuf::from("./mfstat-prefs.json"));
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = AppConfig::default();
        config.api_base_url = "not a url".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_log_level() {
        let mut config = AppConfig::default();
        config.log_level = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = AppConfig::default();
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(url.join("records").unwrap().as_str(), "http://127.0.0.1:8000/records");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.api_base_url, parsed.api_base_url);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: AppConfig = toml::from_str("log_level = \"debug\"").unwrap();
        assert_eq!(parsed.log_level, "debug");
        assert_eq!(parsed.api_base_url, "http://127.0.0.1:8000");
    }
}

//! Configuration module for rcfg-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{AuthConfig, ServerConfig, SharedConfig};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

impl LoadedConfig {
    /// Convert the reloadable sections into a SharedConfig. The server
    /// section stays behind; it is consumed once at startup.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig {
            auth: Arc::new(RwLock::new(self.auth)),
        }
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        validate(&file_config)?;

        Ok(build_loaded_config(file_config))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.auth.api_token.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.api_token must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
        },
        auth: AuthConfig {
            api_token: file_config.auth.api_token,
            identity_verify_url: file_config.auth.identity.verify_url,
            identity_timeout: Duration::from_secs(file_config.auth.identity.timeout_secs),
        },
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(api_token: &str) -> FileConfig {
        toml::from_str(&format!(
            r#"
[server]
listen = "127.0.0.1:3000"

[auth]
api_token = "{api_token}"

[auth.identity]
verify_url = "https://id.example.com/v1/verify"
"#
        ))
        .unwrap()
    }

    #[test]
    fn test_empty_api_token_rejected() {
        assert!(matches!(
            validate(&file_config("")),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(validate(&file_config("reader-secret")).is_ok());
    }

    #[test]
    fn test_build_converts_timeout_to_duration() {
        let loaded = build_loaded_config(file_config("reader-secret"));
        assert_eq!(loaded.auth.identity_timeout, Duration::from_secs(5));
        assert_eq!(loaded.server.listen.port(), 3000);
    }
}

//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{join_errors, validate_config, ValidationError};

/// Environment variable overriding `base_path`.
pub const BASE_URL_ENV: &str = "VIEW_ROUTER_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Supported manifest encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Deserialize a manifest without validating it.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<RouterConfig, ConfigError> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };
    Ok(config)
}

/// Apply a base URL taken from the environment, if any.
pub fn apply_env_overrides(config: &mut RouterConfig, base_url: Option<String>) {
    if let Some(base) = base_url.filter(|b| !b.trim().is_empty()) {
        tracing::debug!(base_path = %base, "base path overridden from environment");
        config.base_path = base.trim().to_string();
    }
}

/// Load and validate configuration from a TOML or JSON file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content, format)?;

    apply_env_overrides(&mut config, std::env::var(BASE_URL_ENV).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

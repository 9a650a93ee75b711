//! Configuration loading from disk.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use url::Url;

use crate::config::schema::ServiceConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(reason) => write!(f, "Validation failed: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ServiceConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config)?;

    Ok(config)
}

/// Semantic checks on top of what serde already guarantees.
pub fn validate_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    config
        .listener
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| {
            ConfigError::Invalid(format!(
                "listener.bind_address `{}`: {}",
                config.listener.bind_address, e
            ))
        })?;

    Url::parse(&config.downstream.pricing_url).map_err(|e| {
        ConfigError::Invalid(format!(
            "downstream.pricing_url `{}`: {}",
            config.downstream.pricing_url, e
        ))
    })?;

    if config.dataset.path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("dataset.path must be set".to_string()));
    }

    if !(0.0..=1.0).contains(&config.trace.sample_ratio) {
        return Err(ConfigError::Invalid(format!(
            "trace.sample_ratio {} is outside 0.0..=1.0",
            config.trace.sample_ratio
        )));
    }

    if config.observability.metrics_enabled {
        config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .map_err(|e| {
                ConfigError::Invalid(format!(
                    "observability.metrics_address `{}`: {}",
                    config.observability.metrics_address, e
                ))
            })?;
    }

    Ok(())
}

//! Application configuration structures
//!
//! This module contains the configuration structures read by the validation
//! service and the `rpc-validate` binary.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::error::AppError;

/// API version window accepted by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    /// Lowest accepted `api_version`
    #[validate(range(min = 1, max = 100))]
    pub min_version: u32,

    /// Highest accepted `api_version`
    #[validate(range(min = 1, max = 100))]
    pub max_version: u32,

    /// Version assumed when a request carries no `api_version`
    #[validate(range(min = 1, max = 100))]
    pub default_version: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            min_version: 1,
            max_version: 2,
            default_version: 1,
        }
    }
}

/// Request validation limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum number of top-level keys a request may carry
    #[validate(range(min = 1, max = 4096))]
    pub max_request_keys: usize,

    /// Commands refused before their specification runs
    pub disabled_commands: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_request_keys: 64,
            disabled_commands: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format: "full" or "compact"
    #[validate(length(min = 1))]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "full".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API version configuration
    pub api: ApiConfig,

    /// Validation limits
    pub validation: ValidationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(
                config::Environment::with_prefix("RPC_VALIDATION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.checked()
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(source: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(source)?;
        config.checked()
    }

    /// Validate every section
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.api.validate()?;
        self.validation.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    fn checked(self) -> crate::Result<Self> {
        self.validate_config()
            .map_err(|e| AppError::Validation(format!("Configuration validation failed: {}", e)))?;
        super::ConfigValidator::validate_config(&self)?;
        Ok(self)
    }

    /// Whether `command` has been switched off
    pub fn is_disabled(&self, command: &str) -> bool {
        self.validation
            .disabled_commands
            .iter()
            .any(|disabled| disabled == command)
    }
}

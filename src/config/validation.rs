//! Configuration validation module
//!
//! This module provides validation rules that span more than one field and
//! so cannot be expressed with the validator crate's derive attributes.

use crate::config::app_config::{ApiConfig, AppConfig, LoggingConfig};
use crate::shared::error::AppError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["full", "compact"];

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_api_config(&config.api)?;
        Self::validate_logging_config(&config.logging)?;

        for command in &config.validation.disabled_commands {
            if command.trim().is_empty() {
                return Err(AppError::Validation(
                    "Disabled command names must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Validate the API version window
    fn validate_api_config(api: &ApiConfig) -> crate::Result<()> {
        if api.min_version > api.max_version {
            return Err(AppError::Validation(format!(
                "API min_version {} is greater than max_version {}",
                api.min_version, api.max_version
            )));
        }

        if !(api.min_version..=api.max_version).contains(&api.default_version) {
            return Err(AppError::Validation(format!(
                "API default_version {} is outside [{}, {}]",
                api.default_version, api.min_version, api.max_version
            )));
        }

        Ok(())
    }

    /// Validate logging configuration
    fn validate_logging_config(logging: &LoggingConfig) -> crate::Result<()> {
        // Full filter directives such as "ledger_rpc_validator=debug" are passed through.
        let level = logging.level.to_lowercase();
        if !level.contains('=') && !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid log level: {}",
                logging.level
            )));
        }

        if !LOG_FORMATS.contains(&logging.format.as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid log format: {}",
                logging.format
            )));
        }

        Ok(())
    }
}

//! Logging utilities module
//!
//! This module provides centralized logging setup and the structured events
//! emitted around each validated request.

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::app_config::LoggingConfig;
use crate::domain::rpc::{Status, Warning};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(config: &LoggingConfig) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.level));

        let subscriber_builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(std::io::stderr);

        let result = if config.format == "compact" {
            tracing::subscriber::set_global_default(subscriber_builder.compact().finish())
        } else {
            tracing::subscriber::set_global_default(subscriber_builder.finish())
        };

        result.map_err(|e| {
            crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e))
        })
    }

    /// Log a request that passed validation
    pub fn log_validated(request_id: &str, command: &str, api_version: u32, warnings: &[Warning]) {
        info!(
            request_id = %request_id,
            command = %command,
            api_version = api_version,
            warnings = warnings.len(),
            "Request validated"
        );
    }

    /// Log a request the engine rejected
    pub fn log_rejected(request_id: &str, command: &str, api_version: u32, status: &Status) {
        debug!(
            request_id = %request_id,
            command = %command,
            api_version = api_version,
            code = %status.code,
            message = %status.message(),
            "Request rejected"
        );
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique_uuids() {
        let first = generate_request_id();
        let second = generate_request_id();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}

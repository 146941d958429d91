//! Cross-module test suite for the validation engine
//!
//! Unit-level property checks live in `unit`, end-to-end request flows
//! through the service in `integration`, and shared requests and step
//! doubles in `fixtures`.

pub mod fixtures;
pub mod integration;
pub mod unit;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Create test configuration
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.api.max_version = 3;
        config.validation.max_request_keys = 16;
        config
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_config_initialization() {
        super::config::init();
        let test_config = super::config::test_config();
        assert!(test_config.validate_config().is_ok());
        assert_eq!(test_config.api.max_version, 3);
    }
}

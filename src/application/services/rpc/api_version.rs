use serde_json::Value;

use crate::config::app_config::ApiConfig;
use crate::domain::rpc::{ServerError, Status};

/// Reads `api_version` from a request and checks it against the served window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersionParser {
    default_version: u32,
    min_version: u32,
    max_version: u32,
}

impl ApiVersionParser {
    pub fn new(default_version: u32, min_version: u32, max_version: u32) -> Self {
        Self {
            default_version,
            min_version,
            max_version,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.default_version, config.min_version, config.max_version)
    }

    pub fn default_version(&self) -> u32 {
        self.default_version
    }

    /// Version requested by `params`, or the default when it names none
    pub fn parse(&self, params: &Value) -> Result<u32, Status> {
        let Some(version) = params.get("api_version") else {
            return Ok(self.default_version);
        };

        let version = match (version.as_u64(), version.as_i64()) {
            (Some(version), _) => version,
            (None, Some(_)) => return Err(self.too_low()),
            (None, None) => {
                return Err(Status::with_message(
                    ServerError::InvalidApiVersion,
                    "API version must be an integer",
                ))
            }
        };

        if version < u64::from(self.min_version) {
            return Err(self.too_low());
        }
        if version > u64::from(self.max_version) {
            return Err(Status::with_message(
                ServerError::InvalidApiVersion,
                format!(
                    "Requested API version is higher than maximum supported ({})",
                    self.max_version
                ),
            ));
        }

        // Bounded by max_version above.
        Ok(version as u32)
    }

    fn too_low(&self) -> Status {
        Status::with_message(
            ServerError::InvalidApiVersion,
            format!(
                "Requested API version is lower than minimum supported ({})",
                self.min_version
            ),
        )
    }
}

impl Default for ApiVersionParser {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

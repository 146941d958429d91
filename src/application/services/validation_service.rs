//! Validation service - frames requests and dispatches them to command specs

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use super::rpc::{ApiVersionParser, RequestEnvelope};
use crate::config::AppConfig;
use crate::domain::rpc::{ProtocolError, Status, Warning};
use crate::domain::validation::{CommandInput, MethodRegistry, Validated};
use crate::shared::logging::{generate_request_id, LoggingUtils};

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub request_id: String,
    pub command: String,
    pub api_version: u32,
    pub id: Option<Value>,
    pub validated: Validated<CommandInput>,
}

impl ValidatedRequest {
    pub fn to_json(&self) -> Value {
        let warnings: Vec<Value> = self.validated.warnings.iter().map(Warning::to_json).collect();
        let mut rendered = json!({
            "status": "success",
            "command": self.command,
            "api_version": self.api_version,
            "input": self.validated.input,
            "warnings": warnings,
        });
        if let Some(id) = &self.id {
            rendered["id"] = id.clone();
        }
        rendered
    }
}

/// Validation service that orchestrates request checks
pub struct ValidationService {
    config: Arc<AppConfig>,
    registry: MethodRegistry,
    versions: ApiVersionParser,
}

impl ValidationService {
    /// Create a service over every built-in command
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_registry(config, MethodRegistry::new())
    }

    pub fn with_registry(config: Arc<AppConfig>, registry: MethodRegistry) -> Self {
        let versions = ApiVersionParser::from_config(&config.api);
        Self {
            config,
            registry,
            versions,
        }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate a framed request, reading its API version from the params
    pub fn validate_request(&self, envelope: RequestEnvelope) -> Result<ValidatedRequest, Status> {
        let request_id = generate_request_id();
        let RequestEnvelope {
            command,
            mut params,
            id,
            ..
        } = envelope;

        let api_version = match self.versions.parse(&params) {
            Ok(version) => version,
            Err(status) => {
                LoggingUtils::log_rejected(&request_id, &command, self.versions.default_version(), &status);
                return Err(status);
            }
        };

        match self.validate_command(&command, api_version, &mut params) {
            Ok(validated) => {
                LoggingUtils::log_validated(&request_id, &command, api_version, &validated.warnings);
                Ok(ValidatedRequest {
                    request_id,
                    command,
                    api_version,
                    id,
                    validated,
                })
            }
            Err(status) => {
                LoggingUtils::log_rejected(&request_id, &command, api_version, &status);
                Err(status)
            }
        }
    }

    /// Validate `params` as `command` at an already known API version
    pub fn validate_command(
        &self,
        command: &str,
        api_version: u32,
        params: &mut Value,
    ) -> Result<Validated<CommandInput>, Status> {
        if self.config.is_disabled(command) {
            debug!(command = %command, "Command disabled by configuration");
            return Err(Status::with_message(
                ProtocolError::NotSupported,
                format!("Command '{}' is disabled.", command),
            ));
        }

        let entry = self
            .registry
            .get(command)
            .ok_or_else(|| Status::new(ProtocolError::UnknownCommand))?;

        let keys = params.as_object().map_or(0, |params| params.len());
        let max_keys = self.config.validation.max_request_keys;
        if keys > max_keys {
            return Err(Status::invalid_params(format!(
                "Too many request fields ({} > {}).",
                keys, max_keys
            )));
        }

        entry.validate(params, api_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rpc::{ErrorCode, ServerError};
    use crate::domain::validation::methods::RandomInput;

    fn service() -> ValidationService {
        ValidationService::new(Arc::new(AppConfig::default()))
    }

    #[test]
    fn test_validates_framed_request() {
        let envelope = RequestEnvelope::from_ws(json!({"command": "random", "id": 1})).unwrap();
        let validated = service().validate_request(envelope).unwrap();
        assert_eq!(validated.command, "random");
        assert_eq!(validated.api_version, 1);
        assert_eq!(validated.validated.input, CommandInput::Random(RandomInput {}));

        let rendered = validated.to_json();
        assert_eq!(rendered["status"], "success");
        assert_eq!(rendered["id"], 1);
        assert_eq!(rendered["warnings"], json!([]));
    }

    #[test]
    fn test_rejects_version_outside_window() {
        let envelope =
            RequestEnvelope::from_ws(json!({"command": "random", "api_version": 9})).unwrap();
        let err = service().validate_request(envelope).unwrap_err();
        assert_eq!(err.code, ErrorCode::Server(ServerError::InvalidApiVersion));
    }

    #[test]
    fn test_unknown_command() {
        let err = service()
            .validate_command("teleport", 1, &mut json!({}))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::UnknownCommand));
    }

    #[test]
    fn test_disabled_command() {
        let mut config = AppConfig::default();
        config.validation.disabled_commands = vec!["random".to_string()];
        let service = ValidationService::new(Arc::new(config));

        let err = service.validate_command("random", 1, &mut json!({})).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::NotSupported));
        assert_eq!(err.message(), "Command 'random' is disabled.");
    }

    #[test]
    fn test_too_many_keys() {
        let mut config = AppConfig::default();
        config.validation.max_request_keys = 2;
        let service = ValidationService::new(Arc::new(config));

        let err = service
            .validate_command("random", 1, &mut json!({"a": 1, "b": 2, "c": 3}))
            .unwrap_err();
        assert_eq!(err.message(), "Too many request fields (3 > 2).");
    }
}

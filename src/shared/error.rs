//! Error handling module
//!
//! This module provides centralized error handling for everything around the
//! validation engine: configuration, request framing and I/O. Rejections
//! produced by the engine itself travel as [`Status`] and are wrapped here
//! only when they cross into application code.

use serde_json::Value;
use thiserror::Error;

use crate::domain::rpc::Status;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Request rejected: {0}")]
    Rejected(#[from] Status),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Convert to a JSON-RPC error response
    pub fn to_jsonrpc_error(&self) -> Value {
        let (code, message) = match self {
            AppError::Rejected(status) => return status.to_json(),
            AppError::Json(_) => (-32700, "Parse error".to_string()),
            AppError::Validation(msg) => (-32602, msg.clone()),
            _ => (-32603, "Internal error".to_string()),
        };

        serde_json::json!({
            "error": {
                "code": code,
                "message": message
            }
        })
    }

    /// The engine status behind this error, if it is a rejection
    pub fn status(&self) -> Option<&Status> {
        match self {
            AppError::Rejected(status) => Some(status),
            _ => None,
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

//! Ledger RPC Validator - Declarative parameter validation for ledger JSON-RPC commands
//!
//! This library checks, normalizes and types the parameters of ledger RPC
//! requests before any handler sees them. Each command declares a versioned
//! specification of field steps; the engine runs them fail-fast and either
//! hands back a typed input with warnings or a protocol error status.

pub mod application;
pub mod config;
pub mod domain;
pub mod shared;

#[cfg(test)]
mod tests;

pub use application::{RequestEnvelope, ValidatedRequest, ValidationService};
pub use crate::config::AppConfig;
pub use domain::{CommandInput, MethodRegistry, Status, Warning};
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;

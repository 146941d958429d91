//! Shared utilities module
//!
//! Error types and logging used by every layer of the crate.

pub mod error;
pub mod logging;

pub use error::{AppError, AppResult};
pub use logging::{generate_request_id, LoggingUtils};

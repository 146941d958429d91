//! Application services - Orchestration of domain logic

pub mod rpc;
pub mod validation_service;

pub use rpc::{ApiVersionParser, RequestEnvelope, Transport};
pub use validation_service::{ValidatedRequest, ValidationService};

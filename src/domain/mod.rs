//! Domain layer - Core validation logic and domain models
//!
//! This module contains the status model, the validation engine and the
//! command catalogue. Nothing here depends on configuration, logging setup
//! or how requests arrive.

pub mod json_bool;
pub mod rpc;
pub mod validation;

pub use json_bool::JsonBool;
pub use rpc::{ErrorCode, ProtocolError, ServerError, Status, Warning, WarningCode};
pub use validation::{
    CommandInput, FieldSpec, MethodRegistry, RpcCommand, RpcSpec, Step, Validated,
};

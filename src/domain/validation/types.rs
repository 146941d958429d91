//! Core pipeline types
//!
//! This module defines the three step capabilities (validators, modifiers and
//! meta-processors), the [`Step`] wrapper that lets them share one ordered
//! sequence, and the [`FieldSpec`] / [`RpcSpec`] containers that run them.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::rpc::{Status, Warning};

/// Result of a single validator run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok,
    Warning(Warning),
    Error(Status),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl From<Result<(), Status>> for Outcome {
    fn from(result: Result<(), Status>) -> Self {
        match result {
            Ok(()) => Outcome::Ok,
            Err(status) => Outcome::Error(status),
        }
    }
}

/// Inspects one field of an object
pub trait Validator: Send + Sync {
    fn verify(&self, object: &Value, key: &str) -> Outcome;
}

/// Rewrites one field of an object in place
pub trait Modifier: Send + Sync {
    fn modify(&self, object: &mut Value, key: &str);
}

/// Wraps or composes other steps
pub trait MetaProcessor: Send + Sync {
    fn process(&self, object: &mut Value, key: &str, warnings: &mut Vec<Warning>) -> Result<(), Status>;
}

/// One entry in a field's processing sequence
#[derive(Clone)]
pub enum Step {
    Validate(Arc<dyn Validator>),
    Modify(Arc<dyn Modifier>),
    Meta(Arc<dyn MetaProcessor>),
}

impl Step {
    /// Run this step against `object[key]`.
    ///
    /// Warnings are appended to `warnings`; an error is returned as is.
    pub fn apply(&self, object: &mut Value, key: &str, warnings: &mut Vec<Warning>) -> Result<(), Status> {
        match self {
            Step::Validate(validator) => match validator.verify(object, key) {
                Outcome::Ok => Ok(()),
                Outcome::Warning(warning) => {
                    warnings.push(warning);
                    Ok(())
                }
                Outcome::Error(status) => Err(status),
            },
            Step::Modify(modifier) => {
                modifier.modify(object, key);
                Ok(())
            }
            Step::Meta(meta) => meta.process(object, key, warnings),
        }
    }
}

impl PartialEq for Step {
    /// Steps are equal when they share the same underlying instance
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Step::Validate(a), Step::Validate(b)) => Arc::ptr_eq(a, b),
            (Step::Modify(a), Step::Modify(b)) => Arc::ptr_eq(a, b),
            (Step::Meta(a), Step::Meta(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Validate(_) => f.write_str("Step::Validate"),
            Step::Modify(_) => f.write_str("Step::Modify"),
            Step::Meta(_) => f.write_str("Step::Meta"),
        }
    }
}

/// A field name bound to its ordered steps
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    key: String,
    steps: Vec<Step>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            key: key.into(),
            steps: steps.into_iter().collect(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, stopping at the first error
    pub fn process(&self, object: &mut Value, warnings: &mut Vec<Warning>) -> Result<(), Status> {
        for step in &self.steps {
            step.apply(object, &self.key, warnings)?;
        }
        Ok(())
    }
}

/// The failing field and its status, used to name nested failures.
///
/// `path` starts at the field of the spec that failed and runs down to the
/// innermost field when the failure came from a nested section.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldFailure {
    pub path: Vec<String>,
    pub status: Status,
}

/// Ordered field specifications for one command and API version
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpcSpec {
    fields: Vec<FieldSpec>,
}

impl RpcSpec {
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Compose `base` with an additive overlay.
    ///
    /// Keys present in both run twice: base rules first, overlay rules after.
    pub fn extend(base: &RpcSpec, overlay: impl IntoIterator<Item = FieldSpec>) -> Self {
        let mut fields = base.fields.clone();
        fields.extend(overlay);
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate `object`, returning the accumulated warnings or the first error
    pub fn process(&self, object: &mut Value) -> Result<Vec<Warning>, Status> {
        let mut warnings = Vec::new();
        self.process_into(object, &mut warnings)?;
        Ok(warnings)
    }

    /// Validate `object`, appending warnings to an existing accumulator
    pub fn process_into(&self, object: &mut Value, warnings: &mut Vec<Warning>) -> Result<(), Status> {
        self.process_fields(object, warnings)
            .map_err(|failure| failure.status)
    }

    pub(crate) fn process_fields(
        &self,
        object: &mut Value,
        warnings: &mut Vec<Warning>,
    ) -> Result<(), FieldFailure> {
        for field in &self.fields {
            field.process(object, warnings).map_err(|status| {
                let path = match status.field_path() {
                    Some(nested) => nested.segments.clone(),
                    None => vec![field.key.clone()],
                };
                FieldFailure { path, status }
            })?;
        }
        Ok(())
    }
}

/// A misconfigured specification detected while validating.
///
/// These are programming defects: a bound check ran on a value no `Type` step
/// guaranteed, or validated fields could not be turned into typed input.
#[derive(Debug, Error)]
pub enum ContractViolation {
    #[error("field '{key}' is not convertible to {expected}")]
    BoundMismatch { key: String, expected: &'static str },

    #[error("validated input for '{command}' is not convertible: {reason}")]
    Conversion { command: &'static str, reason: String },
}

impl ContractViolation {
    /// Log the violation and turn it into a status.
    ///
    /// Debug builds panic so tests catch the bad spec; release builds answer
    /// with an internal error instead of crashing on user input.
    pub fn report(self) -> Status {
        tracing::error!(violation = %self, "validation contract violated");
        if cfg!(debug_assertions) {
            panic!("validation contract violated: {self}");
        }
        Status::internal()
    }
}

/// Look up `key` when `object` is an object
pub fn field<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    object.as_object()?.get(key)
}

pub fn field_mut<'a>(object: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    object.as_object_mut()?.get_mut(key)
}

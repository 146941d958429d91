//! Field validators
//!
//! Every validator except [`Required`] treats an absent field as valid;
//! enforcing presence is left to an explicit `Required` step.

use std::sync::Arc;

use serde_json::Value;

use super::bounds::{Bound, Conversion};
use super::checker::JsonType;
use super::types::{field, ContractViolation, Outcome, Step, Validator};
use crate::domain::rpc::{ProtocolError, Status, Warning, WarningCode};

/// Fails when the field is missing or null
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Validator for Required {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        match field(object, key) {
            Some(value) if !value.is_null() => Outcome::Ok,
            _ => Outcome::Error(Status::invalid_params(format!(
                "Required field '{key}' missing"
            ))),
        }
    }
}

/// Accepts the field if any of the listed kinds does
#[derive(Debug, Clone)]
pub struct Type {
    kinds: Vec<JsonType>,
}

impl Validator for Type {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        let Some(value) = field(object, key) else {
            return Outcome::Ok;
        };

        if self.kinds.iter().any(|kind| kind.accepts(value)) {
            Outcome::Ok
        } else {
            Outcome::Error(Status::new(ProtocolError::InvalidParams))
        }
    }
}

/// Convert a present field to `T`, reporting a kind mismatch as a contract violation
fn convert<T: Bound>(value: &Value, key: &str) -> Result<Conversion<T>, Status> {
    match T::convert(value) {
        Conversion::Mismatch => Err(ContractViolation::BoundMismatch {
            key: key.to_string(),
            expected: T::EXPECTED,
        }
        .report()),
        conversion => Ok(conversion),
    }
}

/// Run `check` on the converted field value, treating absence as success
fn check_bound<T: Bound>(
    object: &Value,
    key: &str,
    check: impl FnOnce(Conversion<T>) -> bool,
    error: impl FnOnce() -> Status,
) -> Outcome {
    let Some(value) = field(object, key) else {
        return Outcome::Ok;
    };

    match convert::<T>(value, key) {
        Ok(conversion) => {
            if check(conversion) {
                Outcome::Ok
            } else {
                Outcome::Error(error())
            }
        }
        Err(status) => Outcome::Error(status),
    }
}

/// Inclusive range check
#[derive(Debug, Clone)]
pub struct Between<T> {
    min: T,
    max: T,
}

impl<T: Bound> Validator for Between<T> {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        check_bound::<T>(
            object,
            key,
            |conversion| matches!(conversion, Conversion::Exact(v) if v >= self.min && v <= self.max),
            || Status::new(ProtocolError::InvalidParams),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Min<T> {
    min: T,
}

impl<T: Bound> Validator for Min<T> {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        check_bound::<T>(
            object,
            key,
            |conversion| match conversion {
                Conversion::Exact(v) => v >= self.min,
                Conversion::AboveRange => true,
                _ => false,
            },
            || Status::new(ProtocolError::InvalidParams),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Max<T> {
    max: T,
}

impl<T: Bound> Validator for Max<T> {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        check_bound::<T>(
            object,
            key,
            |conversion| match conversion {
                Conversion::Exact(v) => v <= self.max,
                Conversion::BelowRange => true,
                _ => false,
            },
            || Status::new(ProtocolError::InvalidParams),
        )
    }
}

#[derive(Debug, Clone)]
pub struct EqualTo<T> {
    expected: T,
}

impl<T: Bound> Validator for EqualTo<T> {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        check_bound::<T>(
            object,
            key,
            |conversion| matches!(conversion, Conversion::Exact(v) if v == self.expected),
            || Status::new(ProtocolError::InvalidParams),
        )
    }
}

/// Membership in a fixed option set; matching is exact
#[derive(Debug, Clone)]
pub struct OneOf<T> {
    options: Vec<T>,
}

impl<T: Bound> Validator for OneOf<T> {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        check_bound::<T>(
            object,
            key,
            |conversion| matches!(conversion, Conversion::Exact(v) if self.options.contains(&v)),
            || Status::invalid_params(format!("Invalid field '{key}'.")),
        )
    }
}

/// Severity and wording used by [`BadField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStrategy {
    /// Reject the request
    NotSupported,
    /// Let the request through with a warning
    Deprecated,
}

impl ErrorStrategy {
    fn field_outcome(self, key: &str) -> Outcome {
        match self {
            ErrorStrategy::NotSupported => Outcome::Error(Status::with_message(
                ProtocolError::NotSupported,
                format!("Not supported field '{key}'"),
            )),
            ErrorStrategy::Deprecated => Outcome::Warning(Warning::new(
                WarningCode::Deprecated,
                format!(
                    "Field '{key}' is deprecated and was not used to process your request. Please update your request."
                ),
            )),
        }
    }

    fn value_outcome(self, key: &str, value: &dyn std::fmt::Display) -> Outcome {
        match self {
            ErrorStrategy::NotSupported => Outcome::Error(Status::with_message(
                ProtocolError::NotSupported,
                format!("Not supported field '{key}'s value '{value}'"),
            )),
            ErrorStrategy::Deprecated => Outcome::Warning(Warning::new(
                WarningCode::Deprecated,
                format!(
                    "Value '{value}' for field '{key}' is deprecated and was not used to process your request. Please update your request."
                ),
            )),
        }
    }
}

/// A field, or one specific value of it, the server refuses or ignores
#[derive(Debug, Clone)]
pub struct BadField<T> {
    strategy: ErrorStrategy,
    value: Option<T>,
}

impl<T: Bound> Validator for BadField<T> {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        let Some(present) = field(object, key) else {
            return Outcome::Ok;
        };

        let Some(bad) = &self.value else {
            return self.strategy.field_outcome(key);
        };

        match convert::<T>(present, key) {
            Ok(Conversion::Exact(v)) if &v == bad => self.strategy.value_outcome(key, bad),
            Ok(_) => Outcome::Ok,
            Err(status) => Outcome::Error(status),
        }
    }
}

type CheckFn = dyn Fn(&Value, &str) -> Result<(), Status> + Send + Sync;

/// Closure-backed validator used by the domain catalogue
pub struct CustomValidator {
    check: Box<CheckFn>,
}

impl CustomValidator {
    pub fn new(check: impl Fn(&Value, &str) -> Result<(), Status> + Send + Sync + 'static) -> Self {
        Self { check: Box::new(check) }
    }
}

impl Validator for CustomValidator {
    fn verify(&self, object: &Value, key: &str) -> Outcome {
        match field(object, key) {
            Some(value) => (self.check)(value, key).into(),
            None => Outcome::Ok,
        }
    }
}

fn step(validator: impl Validator + 'static) -> Step {
    Step::Validate(Arc::new(validator))
}

pub fn required() -> Step {
    step(Required)
}

pub fn type_of(kinds: &[JsonType]) -> Step {
    step(Type {
        kinds: kinds.to_vec(),
    })
}

/// Shorthand for a single-kind [`Type`] check
pub fn is(kind: JsonType) -> Step {
    type_of(&[kind])
}

pub fn between<T: Bound>(min: T, max: T) -> Step {
    step(Between { min, max })
}

pub fn min<T: Bound>(min: T) -> Step {
    step(Min { min })
}

pub fn max<T: Bound>(max: T) -> Step {
    step(Max { max })
}

pub fn equal_to<T: Bound>(expected: T) -> Step {
    step(EqualTo { expected })
}

pub fn equal_to_str(expected: &str) -> Step {
    equal_to(expected.to_string())
}

pub fn one_of<T: Bound>(options: impl IntoIterator<Item = T>) -> Step {
    step(OneOf {
        options: options.into_iter().collect(),
    })
}

pub fn one_of_str(options: &[&str]) -> Step {
    one_of(options.iter().map(|option| option.to_string()))
}

pub fn not_supported() -> Step {
    step(BadField::<String> {
        strategy: ErrorStrategy::NotSupported,
        value: None,
    })
}

pub fn not_supported_value<T: Bound>(value: T) -> Step {
    step(BadField {
        strategy: ErrorStrategy::NotSupported,
        value: Some(value),
    })
}

pub fn deprecated() -> Step {
    step(BadField::<String> {
        strategy: ErrorStrategy::Deprecated,
        value: None,
    })
}

pub fn deprecated_value<T: Bound>(value: T) -> Step {
    step(BadField {
        strategy: ErrorStrategy::Deprecated,
        value: Some(value),
    })
}

/// Wrap a closure receiving the present field value and its key
pub fn custom(check: impl Fn(&Value, &str) -> Result<(), Status> + Send + Sync + 'static) -> Step {
    step(CustomValidator::new(check))
}

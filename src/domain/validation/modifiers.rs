//! In-place field modifiers
//!
//! Modifiers never fail. A value they do not understand is left untouched
//! for the surrounding validators to judge.

use std::sync::Arc;

use serde_json::Value;

use super::bounds::{Bound, Conversion};
use super::types::{field_mut, Modifier, Step};

/// Clamp a numeric field into `[min, max]`
#[derive(Debug, Clone)]
pub struct Clamp<T> {
    min: T,
    max: T,
}

impl<T: Bound> Modifier for Clamp<T> {
    fn modify(&self, object: &mut Value, key: &str) {
        let Some(value) = field_mut(object, key) else {
            return;
        };

        let clamped = match T::convert(value) {
            Conversion::Exact(v) if v < self.min => self.min.clone(),
            Conversion::Exact(v) if v > self.max => self.max.clone(),
            Conversion::Exact(_) | Conversion::Mismatch => return,
            Conversion::BelowRange => self.min.clone(),
            Conversion::AboveRange => self.max.clone(),
        };
        *value = clamped.to_json();
    }
}

/// Lower-case the ASCII letters of a string field
#[derive(Debug, Clone, Copy, Default)]
pub struct ToLower;

impl Modifier for ToLower {
    fn modify(&self, object: &mut Value, key: &str) {
        if let Some(Value::String(s)) = field_mut(object, key) {
            s.make_ascii_lowercase();
        }
    }
}

pub fn clamp<T: Bound>(min: T, max: T) -> Step {
    Step::Modify(Arc::new(Clamp { min, max }))
}

pub fn to_lower() -> Step {
    Step::Modify(Arc::new(ToLower))
}

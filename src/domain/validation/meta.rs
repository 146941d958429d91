//! Meta-processors: steps that wrap or nest other steps

use std::sync::Arc;

use serde_json::Value;

use super::checker::JsonType;
use super::types::{field, field_mut, FieldFailure, FieldSpec, MetaProcessor, RpcSpec, Step};
use crate::domain::rpc::{Status, Warning};

/// Replace the error of the wrapped step with a fixed status
pub struct WithCustomError {
    inner: Step,
    status: Status,
}

impl MetaProcessor for WithCustomError {
    fn process(&self, object: &mut Value, key: &str, warnings: &mut Vec<Warning>) -> Result<(), Status> {
        self.inner
            .apply(object, key, warnings)
            .map_err(|_| self.status.clone())
    }
}

/// Report a nested failure under the field holding the nested object
fn nest(outer: String, failure: FieldFailure) -> Status {
    let FieldFailure { mut path, status } = failure;
    path.insert(0, outer);
    status.nested_at(path)
}

/// Validate an object field against a nested specification
pub struct Section {
    spec: RpcSpec,
}

impl MetaProcessor for Section {
    fn process(&self, object: &mut Value, key: &str, warnings: &mut Vec<Warning>) -> Result<(), Status> {
        match field_mut(object, key) {
            Some(nested) if nested.is_object() => self
                .spec
                .process_fields(nested, warnings)
                .map_err(|failure| nest(key.to_string(), failure)),
            // absent, or left for the preceding Type step
            _ => Ok(()),
        }
    }
}

/// Validate the element at `index` of an array field against a nested specification
pub struct ValidateArrayAt {
    index: usize,
    spec: RpcSpec,
}

impl MetaProcessor for ValidateArrayAt {
    fn process(&self, object: &mut Value, key: &str, warnings: &mut Vec<Warning>) -> Result<(), Status> {
        let Some(Value::Array(items)) = field_mut(object, key) else {
            return Ok(());
        };

        let Some(element) = items.get_mut(self.index) else {
            return Err(Status::invalid_params(format!(
                "Field '{key}' has no element at index {}",
                self.index
            )));
        };

        self.spec
            .process_fields(element, warnings)
            .map_err(|failure| nest(format!("{key}[{}]", self.index), failure))
    }
}

/// Run the wrapped steps only when the field holds the given kind
pub struct IfType {
    kind: JsonType,
    steps: Vec<Step>,
}

impl MetaProcessor for IfType {
    fn process(&self, object: &mut Value, key: &str, warnings: &mut Vec<Warning>) -> Result<(), Status> {
        if !field(object, key).is_some_and(|value| self.kind.accepts(value)) {
            return Ok(());
        }

        for step in &self.steps {
            step.apply(object, key, warnings)?;
        }
        Ok(())
    }
}

pub fn with_custom_error(inner: Step, status: Status) -> Step {
    Step::Meta(Arc::new(WithCustomError { inner, status }))
}

pub fn section(fields: impl IntoIterator<Item = FieldSpec>) -> Step {
    Step::Meta(Arc::new(Section {
        spec: RpcSpec::new(fields),
    }))
}

pub fn validate_array_at(index: usize, fields: impl IntoIterator<Item = FieldSpec>) -> Step {
    Step::Meta(Arc::new(ValidateArrayAt {
        index,
        spec: RpcSpec::new(fields),
    }))
}

pub fn if_type(kind: JsonType, steps: impl IntoIterator<Item = Step>) -> Step {
    Step::Meta(Arc::new(IfType {
        kind,
        steps: steps.into_iter().collect(),
    }))
}

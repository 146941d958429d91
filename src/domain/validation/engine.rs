//! Command validation entry point
//!
//! A command pairs a versioned [`RpcSpec`] with a typed input. [`validate`]
//! runs the spec fail-fast, then converts the possibly rewritten request.

use serde::Serialize;
use serde_json::Value;

use super::fields::{FromValidated, ValidatedFields};
use super::types::RpcSpec;
use crate::domain::rpc::{Status, Warning};

/// An RPC command the engine knows how to validate
pub trait RpcCommand {
    /// Wire name, as sent in `method` or `command`
    const NAME: &'static str;

    type Input: FromValidated + Serialize + Send + 'static;

    /// Specification for the given API version
    fn spec(api_version: u32) -> &'static RpcSpec;
}

/// Typed input plus the warnings gathered while validating it
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<I> {
    pub input: I,
    pub warnings: Vec<Warning>,
}

impl<I> Validated<I> {
    pub fn map<J>(self, f: impl FnOnce(I) -> J) -> Validated<J> {
        Validated {
            input: f(self.input),
            warnings: self.warnings,
        }
    }
}

/// Validate `request` against `spec` and build `I` from the result
pub fn validate_with<I: FromValidated>(
    command: &'static str,
    spec: &RpcSpec,
    request: &mut Value,
) -> Result<Validated<I>, Status> {
    let warnings = spec.process(request)?;
    let input = I::from_validated(&ValidatedFields::new(command, request))
        .map_err(|violation| violation.report())?;

    Ok(Validated { input, warnings })
}

/// Validate `request` as command `C` at the given API version
pub fn validate<C: RpcCommand>(request: &mut Value, api_version: u32) -> Result<Validated<C::Input>, Status> {
    validate_with(C::NAME, C::spec(api_version), request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rpc::{ErrorCode, ProtocolError, WarningCode};
    use crate::domain::validation::checker::JsonType;
    use crate::domain::validation::modifiers::clamp;
    use crate::domain::validation::types::{ContractViolation, FieldSpec};
    use crate::domain::validation::validators::{deprecated, is, required};
    use serde_json::json;
    use std::sync::LazyLock;

    #[derive(Debug, Serialize)]
    struct Page {
        limit: u32,
    }

    impl FromValidated for Page {
        fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
            Ok(Self {
                limit: fields.opt("limit")?.unwrap_or(20),
            })
        }
    }

    struct Paged;

    static PAGED_SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
        RpcSpec::new([
            FieldSpec::new("limit", [is(JsonType::Unsigned), clamp(1u32, 50u32)]),
            FieldSpec::new("strict", [deprecated()]),
        ])
    });

    impl RpcCommand for Paged {
        const NAME: &'static str = "paged";
        type Input = Page;

        fn spec(_api_version: u32) -> &'static RpcSpec {
            &PAGED_SPEC
        }
    }

    #[test]
    fn test_conversion_sees_modified_values() {
        let mut request = json!({"limit": 500, "strict": true});
        let validated = validate::<Paged>(&mut request, 1).unwrap();

        assert_eq!(validated.input.limit, 50);
        assert_eq!(validated.warnings.len(), 1);
        assert_eq!(validated.warnings[0].code, WarningCode::Deprecated);
    }

    #[test]
    fn test_defaults_apply_to_absent_fields() {
        let validated = validate::<Paged>(&mut json!({}), 1).unwrap();
        assert_eq!(validated.input.limit, 20);
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_rejection_carries_status() {
        let err = validate::<Paged>(&mut json!({"limit": "many"}), 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::InvalidParams));
    }

    #[test]
    fn test_validate_with_ad_hoc_spec() {
        let spec = RpcSpec::new([FieldSpec::new("limit", [required()])]);
        let result = validate_with::<Page>("ad_hoc", &spec, &mut json!([]));
        assert!(result.is_err());
    }
}

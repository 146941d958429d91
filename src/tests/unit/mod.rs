//! Unit tests for the engine's documented properties

#[cfg(test)]
mod properties {
    use serde_json::{json, Value};

    use crate::domain::rpc::{ErrorCode, ProtocolError, WarningCode};
    use crate::domain::validation::catalogue::ledger_index;
    use crate::domain::validation::methods::{AccountInfo, AccountTx};
    use crate::domain::validation::modifiers::{clamp, to_lower};
    use crate::domain::validation::validators::{
        between, deprecated, deprecated_value, is, max, min, not_supported, not_supported_value,
        one_of_str, required, type_of,
    };
    use crate::domain::validation::{
        FieldSpec, JsonType, Outcome, RpcCommand, RpcSpec, Step, ValidatedFields,
    };
    use crate::tests::fixtures::{counting_step, warning_ids};

    fn verify(step: &Step, object: Value, key: &str) -> Outcome {
        let mut object = object;
        let mut warnings = Vec::new();
        match step.apply(&mut object, key, &mut warnings) {
            Ok(()) => warnings.pop().map_or(Outcome::Ok, Outcome::Warning),
            Err(status) => Outcome::Error(status),
        }
    }

    #[test]
    fn test_required_fails_only_on_missing_or_null() {
        let step = required();
        assert!(verify(&step, json!({}), "k").is_error());
        assert!(verify(&step, json!({"k": null}), "k").is_error());
        for present in [json!(0), json!(""), json!(false), json!([]), json!({})] {
            assert!(verify(&step, json!({ "k": present }), "k").is_ok());
        }
    }

    #[test]
    fn test_type_accepts_any_listed_kind() {
        let step = type_of(&[JsonType::String, JsonType::Unsigned]);
        assert!(verify(&step, json!({}), "k").is_ok());
        assert!(verify(&step, json!({"k": "x"}), "k").is_ok());
        assert!(verify(&step, json!({"k": 3}), "k").is_ok());
        assert!(verify(&step, json!({"k": -3}), "k").is_error());
        assert!(verify(&step, json!({"k": 1.5}), "k").is_error());
        assert!(verify(&step, json!({"k": null}), "k").is_error());
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let range = between(10u32, 20u32);
        assert!(verify(&range, json!({}), "k").is_ok());
        assert!(verify(&range, json!({"k": 10}), "k").is_ok());
        assert!(verify(&range, json!({"k": 20}), "k").is_ok());
        assert!(verify(&range, json!({"k": 9}), "k").is_error());
        assert!(verify(&range, json!({"k": 21}), "k").is_error());

        assert!(verify(&min(5i32), json!({"k": 5}), "k").is_ok());
        assert!(verify(&min(5i32), json!({"k": 4}), "k").is_error());
        assert!(verify(&max(5i32), json!({"k": 5}), "k").is_ok());
        assert!(verify(&max(5i32), json!({"k": 6}), "k").is_error());
    }

    #[test]
    fn test_one_of_is_case_sensitive() {
        let step = one_of_str(&["payment", "offercreate"]);
        assert!(verify(&step, json!({}), "k").is_ok());
        assert!(verify(&step, json!({"k": "payment"}), "k").is_ok());
        assert!(verify(&step, json!({"k": "Payment"}), "k").is_error());
    }

    #[test]
    fn test_bad_field_strategies_never_cross() {
        let values = [json!({}), json!({"k": 1}), json!({"k": "x"}), json!({"k": null})];
        for object in values {
            let refused = verify(&not_supported(), object.clone(), "k");
            assert!(!matches!(refused, Outcome::Warning(_)));

            let ignored = verify(&deprecated(), object, "k");
            assert!(!ignored.is_error());
        }

        assert!(verify(&not_supported(), json!({"k": 1}), "k").is_error());
        assert!(matches!(
            verify(&deprecated(), json!({"k": 1}), "k"),
            Outcome::Warning(_)
        ));
    }

    #[test]
    fn test_bad_field_value_form_matches_exact_value() {
        assert!(verify(&not_supported_value(true), json!({"k": true}), "k").is_error());
        assert!(verify(&not_supported_value(true), json!({"k": false}), "k").is_ok());

        let Outcome::Warning(warning) = verify(&deprecated_value(1u32), json!({"k": 1}), "k") else {
            panic!("expected a deprecation warning");
        };
        assert_eq!(warning.code, WarningCode::Deprecated);
        assert!(verify(&deprecated_value(1u32), json!({"k": 2}), "k").is_ok());
    }

    #[test]
    fn test_v2_spec_is_v1_followed_by_overlay() {
        for (v1, v2) in [
            (AccountTx::spec(1), AccountTx::spec(2)),
            (AccountInfo::spec(1), AccountInfo::spec(2)),
        ] {
            assert!(v2.len() > v1.len());
            assert_eq!(&v2.fields()[..v1.len()], v1.fields());
        }
    }

    #[test]
    fn test_duplicated_key_runs_both_field_specs() {
        let (first, first_step) = counting_step();
        let (second, second_step) = counting_step();
        let base = RpcSpec::new([FieldSpec::new("limit", [first_step])]);
        let spec = RpcSpec::extend(&base, [FieldSpec::new("limit", [second_step])]);

        spec.process(&mut json!({"limit": 1})).unwrap();
        assert_eq!((first.calls(), second.calls()), (1, 1));
    }

    #[test]
    fn test_fails_fast_on_first_error() {
        let (counter, counting) = counting_step();
        let spec = RpcSpec::new([
            FieldSpec::new("account", [required()]),
            FieldSpec::new("limit", [counting]),
        ]);

        assert!(spec.process(&mut json!({"limit": 1})).is_err());
        assert_eq!(counter.calls(), 0);

        spec.process(&mut json!({"account": "a", "limit": 1})).unwrap();
        assert_eq!(counter.calls(), 1);
    }

    #[test]
    fn test_scenario_1_missing_required_field() {
        let spec = RpcSpec::new([FieldSpec::new("account", [required()])]);
        let err = spec.process(&mut json!({})).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::InvalidParams));
        assert_eq!(err.message(), "Required field 'account' missing");
    }

    #[test]
    fn test_scenario_2_clamp_keeps_in_range_limit() {
        let spec = RpcSpec::new([FieldSpec::new(
            "limit",
            [is(JsonType::Unsigned), min(1u32), clamp(1i32, i32::MAX)],
        )]);
        let mut request = json!({"limit": 5_000_000});
        spec.process(&mut request).unwrap();

        let fields = ValidatedFields::new("scenario", &request);
        assert_eq!(fields.opt::<u32>("limit").unwrap(), Some(5_000_000));
    }

    #[test]
    fn test_scenario_3_ledger_index() {
        let spec = RpcSpec::new([FieldSpec::new("ledger_index", [ledger_index()])]);
        assert!(spec.process(&mut json!({"ledger_index": "validated"})).is_ok());
        assert!(spec.process(&mut json!({"ledger_index": 42})).is_ok());
        assert!(spec.process(&mut json!({"ledger_index": "abc"})).is_err());
    }

    #[test]
    fn test_scenario_4_lowercase_then_one_of() {
        let spec = RpcSpec::new([FieldSpec::new(
            "tx_type",
            [is(JsonType::String), to_lower(), one_of_str(&["payment", "offercreate"])],
        )]);
        let mut request = json!({"tx_type": "Payment"});
        spec.process(&mut request).unwrap();
        assert_eq!(request["tx_type"], "payment");
    }

    #[test]
    fn test_scenario_5_not_supported_value() {
        let spec = RpcSpec::new([FieldSpec::new("field2", [not_supported_value(123i32)])]);
        let err = spec.process(&mut json!({"field2": 123})).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::NotSupported));
        assert!(spec.process(&mut json!({"field2": 456})).is_ok());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "validation contract violated"))]
    fn test_scenario_5_mismatched_value_kind_is_contract_violation() {
        let spec = RpcSpec::new([FieldSpec::new("field2", [not_supported_value(123i32)])]);
        let err = spec.process(&mut json!({"field2": "value1"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::Internal));
    }

    #[test]
    fn test_scenario_6_deprecated_field_warns() {
        let spec = RpcSpec::new([FieldSpec::new("field1", [deprecated()])]);

        let warnings = spec.process(&mut json!({"field1": "x"})).unwrap();
        assert_eq!(warning_ids(&warnings), vec![2004]);

        let warnings = spec.process(&mut json!({})).unwrap();
        assert!(warnings.is_empty());
    }
}

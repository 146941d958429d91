//! Integration tests: raw requests through framing, versioning and dispatch

#[cfg(test)]
mod service {
    use std::sync::Arc;

    use serde_json::json;

    use crate::application::{RequestEnvelope, ValidationService};
    use crate::domain::rpc::{ErrorCode, ProtocolError, ServerError};
    use crate::domain::validation::methods::{AccountTxInput, LedgerInput, TxMarker};
    use crate::domain::validation::{CommandInput, LedgerIndex};
    use crate::shared::error::AppError;
    use crate::tests::config::{init, test_config};
    use crate::tests::fixtures::{http_request, warning_ids, ws_request, ACCOUNT, ISSUER, LEDGER_HASH};

    fn service() -> ValidationService {
        init();
        ValidationService::new(Arc::new(test_config()))
    }

    fn account_tx(validated: CommandInput) -> AccountTxInput {
        match validated {
            CommandInput::AccountTx(input) => input,
            other => panic!("expected account_tx input, got {other:?}"),
        }
    }

    #[test]
    fn test_account_tx_over_http() {
        let request = http_request(
            "account_tx",
            json!({
                "account": ACCOUNT,
                "ledger_index": "validated",
                "limit": 5_000_000,
                "tx_type": "Payment",
                "marker": {"ledger": 70, "seq": 3},
            }),
        );
        let envelope = RequestEnvelope::from_value(request).unwrap();
        let validated = service().validate_request(envelope).unwrap();
        assert_eq!(validated.api_version, 1);

        let input = account_tx(validated.validated.input);
        assert_eq!(input.account, ACCOUNT);
        assert_eq!(input.ledger_index, Some(LedgerIndex::Validated));
        assert_eq!(input.limit, Some(5_000_000));
        assert_eq!(input.tx_type.as_deref(), Some("payment"));
        assert_eq!(input.marker, Some(TxMarker { ledger: 70, seq: 3 }));
    }

    #[test]
    fn test_account_tx_v2_rejects_non_bool_flags() {
        let request = ws_request(
            "account_tx",
            json!({"account": ACCOUNT, "binary": 1, "api_version": 2}),
        );
        let envelope = RequestEnvelope::from_value(request).unwrap();
        let err = service().validate_request(envelope).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::InvalidParams));

        let request = ws_request("account_tx", json!({"account": ACCOUNT, "binary": 1}));
        let envelope = RequestEnvelope::from_value(request).unwrap();
        let input = account_tx(service().validate_request(envelope).unwrap().validated.input);
        assert!(input.binary.value());
    }

    #[test]
    fn test_ledger_with_deprecated_type_warns() {
        let request = ws_request(
            "ledger",
            json!({"ledger_hash": LEDGER_HASH, "type": "account", "transactions": true}),
        );
        let envelope = RequestEnvelope::from_value(request).unwrap();
        let validated = service().validate_request(envelope).unwrap();
        assert_eq!(warning_ids(&validated.validated.warnings), vec![2004]);

        let rendered = validated.to_json();
        assert_eq!(rendered["warnings"][0]["id"], 2004);

        let CommandInput::Ledger(LedgerInput {
            ledger_hash,
            transactions,
            ..
        }) = validated.validated.input
        else {
            panic!("expected ledger input");
        };
        assert_eq!(ledger_hash.as_deref(), Some(LEDGER_HASH));
        assert!(transactions);
    }

    #[test]
    fn test_ledger_refuses_full() {
        let request = ws_request("ledger", json!({"full": true}));
        let envelope = RequestEnvelope::from_value(request).unwrap();
        let err = service().validate_request(envelope).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::NotSupported));
    }

    #[test]
    fn test_book_offers_issue_errors_keep_their_codes() {
        let request = ws_request(
            "book_offers",
            json!({
                "taker_gets": {"currency": "XRP"},
                "taker_pays": {"currency": "USD", "issuer": ISSUER},
            }),
        );
        let envelope = RequestEnvelope::from_value(request).unwrap();
        assert!(service().validate_request(envelope).is_ok());

        let request = ws_request(
            "book_offers",
            json!({
                "taker_gets": {"currency": "XRP"},
                "taker_pays": {"currency": "USD", "issuer": "not an account"},
            }),
        );
        let envelope = RequestEnvelope::from_value(request).unwrap();
        let err = service().validate_request(envelope).unwrap_err();
        assert_ne!(err.code, ErrorCode::Protocol(ProtocolError::Internal));
    }

    #[test]
    fn test_framing_errors_render_as_status() {
        let err = RequestEnvelope::from_value(json!({"method": ""})).unwrap_err();
        assert_eq!(err.code, ErrorCode::Server(ServerError::CommandIsEmpty));

        let rendered = AppError::from(err).to_jsonrpc_error();
        assert_eq!(rendered["error"], "emptyCommand");
        assert_eq!(rendered["error_code"], 6003);
        assert_eq!(rendered["status"], "error");
    }

    #[test]
    fn test_unknown_command_after_framing() {
        let envelope = RequestEnvelope::from_value(ws_request("teleport", json!({}))).unwrap();
        let err = service().validate_request(envelope).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::UnknownCommand));
    }
}

#[cfg(test)]
mod concurrency {
    use std::sync::Arc;

    use serde_json::json;

    use crate::application::ValidationService;
    use crate::domain::validation::methods::{AccountTx, Subscribe};
    use crate::domain::validation::{validate, RpcCommand};
    use crate::tests::config::test_config;
    use crate::tests::fixtures::ACCOUNT;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_static_specs_are_shared_across_tasks() {
        let service = Arc::new(ValidationService::new(Arc::new(test_config())));

        let mut handles = Vec::new();
        for i in 0..32u32 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let mut params = json!({"account": ACCOUNT, "limit": i + 1});
                let accepted = service.validate_command("account_tx", 1, &mut params).is_ok();

                let mut bad = json!({"limit": i + 1});
                let rejected = service.validate_command("account_tx", 1, &mut bad).is_err();
                accepted && rejected
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert!(std::ptr::eq(AccountTx::spec(2), AccountTx::spec(3)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_warnings_stay_with_their_request() {
        let tasks = (0..16).map(|i| {
            tokio::task::spawn_blocking(move || {
                let mut request = if i % 2 == 0 {
                    json!({"streams": ["ledger"]})
                } else {
                    json!({"streams": ["bogus"]})
                };
                validate::<Subscribe>(&mut request, 1).map(|validated| validated.warnings.len())
            })
        });

        for (i, task) in tasks.collect::<Vec<_>>().into_iter().enumerate() {
            let result = task.await.unwrap();
            if i % 2 == 0 {
                assert_eq!(result.unwrap(), 0);
            } else {
                assert!(result.is_err());
            }
        }
    }
}

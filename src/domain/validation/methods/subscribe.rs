//! `subscribe`: streams, accounts and order books to follow

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use crate::domain::rpc::{ProtocolError, Status};
use crate::domain::validation::catalogue::{parse_issue, subscribe_accounts, subscribe_streams, Issue};
use crate::domain::validation::codec::parse_account;
use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, FieldSpec, RpcSpec};
use crate::domain::validation::validators::custom;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSubscription {
    pub taker_gets: Issue,
    pub taker_pays: Issue,
    pub taker: Option<String>,
    pub both: bool,
    pub snapshot: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SubscribeInput {
    pub streams: Vec<String>,
    pub accounts: Vec<String>,
    pub accounts_proposed: Vec<String>,
    pub books: Vec<BookSubscription>,
}

fn parse_book(book: &Value) -> Option<BookSubscription> {
    let book = book.as_object()?;
    let flag = |key: &str| book.get(key).and_then(Value::as_bool).unwrap_or(false);

    Some(BookSubscription {
        taker_gets: parse_issue(book.get("taker_gets")?.as_object()?)?,
        taker_pays: parse_issue(book.get("taker_pays")?.as_object()?)?,
        taker: book.get("taker").and_then(Value::as_str).map(str::to_string),
        both: flag("both"),
        snapshot: flag("snapshot"),
    })
}

impl FromValidated for SubscribeInput {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        let books: Option<Vec<Value>> = fields.opt_deserialize("books")?;
        let books: Vec<BookSubscription> = books
            .unwrap_or_default()
            .iter()
            .map(|book| {
                parse_book(book).ok_or_else(|| ContractViolation::Conversion {
                    command: Subscribe::NAME,
                    reason: "book is not convertible".to_string(),
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            streams: fields.strings("streams")?.unwrap_or_default(),
            accounts: fields.strings("accounts")?.unwrap_or_default(),
            accounts_proposed: fields.strings("accounts_proposed")?.unwrap_or_default(),
            books,
        })
    }
}

fn check_book(book: &Value) -> Result<(), Status> {
    let book = book
        .as_object()
        .ok_or_else(|| Status::invalid_params("bookNotObject"))?;

    for flag in ["both", "snapshot"] {
        if book.get(flag).is_some_and(|value| !value.is_boolean()) {
            return Err(Status::invalid_params(format!("{flag}NotBool")));
        }
    }

    if let Some(taker) = book.get("taker") {
        if taker.as_str().and_then(parse_account).is_none() {
            return Err(Status::with_message(ProtocolError::ActMalformed, "takerMalformed"));
        }
    }

    for (side, error) in [
        ("taker_pays", ProtocolError::SrcCurMalformed),
        ("taker_gets", ProtocolError::DstAmtMalformed),
    ] {
        let Some(issue) = book.get(side) else {
            return Err(Status::invalid_params(format!("Missing field '{side}'")));
        };
        let issue = issue
            .as_object()
            .ok_or_else(|| Status::invalid_params(format!("Field '{side}' is not an object")))?;
        if parse_issue(issue).is_none() {
            return Err(Status::new(error));
        }
    }
    Ok(())
}

fn check_books(value: &Value, key: &str) -> Result<(), Status> {
    let books = value
        .as_array()
        .ok_or_else(|| Status::invalid_params(format!("{key}NotArray")))?;

    books.iter().try_for_each(check_book)
}

static SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::new([
        FieldSpec::new("streams", [subscribe_streams()]),
        FieldSpec::new("accounts", [subscribe_accounts()]),
        FieldSpec::new("accounts_proposed", [subscribe_accounts()]),
        FieldSpec::new("books", [custom(check_books)]),
    ])
});

pub struct Subscribe;

impl RpcCommand for Subscribe {
    const NAME: &'static str = "subscribe";
    type Input = SubscribeInput;

    fn spec(_api_version: u32) -> &'static RpcSpec {
        &SPEC
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<Subscribe>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rpc::ErrorCode;
    use crate::domain::validation::engine::validate;
    use serde_json::json;

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    #[test]
    fn test_streams_and_accounts() {
        let mut request = json!({
            "streams": ["ledger", "transactions"],
            "accounts": [ACCOUNT],
        });
        let input = validate::<Subscribe>(&mut request, 1).unwrap().input;
        assert_eq!(input.streams, vec!["ledger", "transactions"]);
        assert_eq!(input.accounts, vec![ACCOUNT]);
        assert!(input.books.is_empty());
    }

    #[test]
    fn test_books_convert_with_flags() {
        let mut request = json!({
            "books": [{
                "taker_gets": {"currency": "XRP"},
                "taker_pays": {"currency": "USD", "issuer": ACCOUNT},
                "snapshot": true,
            }],
        });
        let input = validate::<Subscribe>(&mut request, 1).unwrap().input;
        assert_eq!(input.books.len(), 1);
        assert!(input.books[0].snapshot);
        assert!(!input.books[0].both);
    }

    #[test]
    fn test_book_errors() {
        let cases = [
            (json!(["x"]), "bookNotObject"),
            (json!([{"both": 1}]), "bothNotBool"),
            (json!([{"taker_gets": {"currency": "XRP"}}]), "Missing field 'taker_pays'"),
        ];
        for (books, expected) in cases {
            let mut request = json!({ "books": books });
            let err = validate::<Subscribe>(&mut request, 1).unwrap_err();
            assert_eq!(err.message(), expected);
        }

        let mut request = json!({"books": [{
            "taker_gets": {"currency": "XRP"},
            "taker_pays": {"currency": "USD"},
        }]});
        let err = validate::<Subscribe>(&mut request, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::SrcCurMalformed));
    }

    #[test]
    fn test_reporting_only_stream() {
        let mut request = json!({"streams": ["peer_status"]});
        let err = validate::<Subscribe>(&mut request, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::Protocol(ProtocolError::ReportingUnsupported));
    }
}

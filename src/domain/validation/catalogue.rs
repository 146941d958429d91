//! Ledger-specific field validators
//!
//! Each validator here is a [`custom`] step with a fixed acceptance rule.
//! The matching `parse_*` functions are shared with typed input conversion
//! so both sides agree on what a valid value is.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::codec::{
    is_unsigned_integer_string, parse_account, parse_currency, parse_issuer, parse_uint256,
    AccountId, Currency,
};
use super::types::Step;
use super::validators::custom;
use crate::domain::rpc::{ProtocolError, ServerError, Status};

/// Ledger selector: the latest validated ledger or a sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerIndex {
    Validated,
    Sequence(u64),
}

impl Serialize for LedgerIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LedgerIndex::Validated => serializer.serialize_str("validated"),
            LedgerIndex::Sequence(seq) => serializer.serialize_u64(*seq),
        }
    }
}

pub fn parse_ledger_index(value: &Value) -> Option<LedgerIndex> {
    match value {
        Value::Number(n) => n.as_u64().map(LedgerIndex::Sequence),
        Value::String(s) if s == "validated" => Some(LedgerIndex::Validated),
        Value::String(s) if is_unsigned_integer_string::<u32>(s) => {
            s.parse().ok().map(LedgerIndex::Sequence)
        }
        _ => None,
    }
}

/// Pagination cursor of the form `<index>,<hint>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountCursor {
    pub index: String,
    pub hint: u64,
}

pub fn parse_account_cursor(cursor: &str) -> Option<AccountCursor> {
    let (index, hint) = cursor.split_once(',')?;
    parse_uint256(index)?;
    if !is_unsigned_integer_string::<u64>(hint) {
        return None;
    }

    Some(AccountCursor {
        index: index.to_ascii_uppercase(),
        hint: hint.parse().ok()?,
    })
}

/// A currency together with its issuer, absent for the native asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<AccountId>,
}

pub fn parse_issue(object: &Map<String, Value>) -> Option<Issue> {
    let currency = parse_currency(object.get("currency")?.as_str()?)?;

    let issuer = match (currency.is_native(), object.get("issuer")) {
        (true, None) => None,
        (true, Some(_)) => return None,
        (false, Some(Value::String(issuer))) => {
            Some(AccountId::from_base58(issuer).filter(|account| !account.is_zero())?)
        }
        (false, _) => return None,
    };

    Some(Issue { currency, issuer })
}

/// Streams a subscription may name
pub const VALID_STREAMS: &[&str] = &[
    "ledger",
    "transactions",
    "transactions_proposed",
    "book_changes",
    "manifests",
    "validations",
];

/// Streams only a full node can serve
pub const REPORTING_UNSUPPORTED_STREAMS: &[&str] = &["peer_status", "consensus", "server"];

fn not_string(key: &str) -> Status {
    Status::invalid_params(format!("{key}NotString"))
}

fn check_ledger_index(value: &Value, _key: &str) -> Result<(), Status> {
    parse_ledger_index(value)
        .map(|_| ())
        .ok_or_else(|| Status::invalid_params("ledgerIndexMalformed"))
}

fn check_account(value: &Value, key: &str) -> Result<(), Status> {
    let account = value.as_str().ok_or_else(|| not_string(key))?;
    parse_account(account)
        .map(|_| ())
        .ok_or_else(|| Status::with_message(ProtocolError::ActMalformed, format!("{key}Malformed")))
}

fn check_account_base58(value: &Value, key: &str) -> Result<(), Status> {
    let account = value.as_str().ok_or_else(|| not_string(key))?;
    match AccountId::from_base58(account) {
        Some(id) if !id.is_zero() => Ok(()),
        _ => Err(Status::new(ServerError::MalformedAddress)),
    }
}

fn check_account_marker(value: &Value, key: &str) -> Result<(), Status> {
    let cursor = value.as_str().ok_or_else(|| not_string(key))?;
    parse_account_cursor(cursor)
        .map(|_| ())
        .ok_or_else(|| Status::invalid_params("Malformed cursor."))
}

fn check_uint256(value: &Value, key: &str) -> Result<(), Status> {
    let hash = value.as_str().ok_or_else(|| not_string(key))?;
    parse_uint256(hash)
        .map(|_| ())
        .ok_or_else(|| Status::invalid_params(format!("{key}Malformed")))
}

fn check_currency(value: &Value, key: &str) -> Result<(), Status> {
    let code = value.as_str().ok_or_else(|| not_string(key))?;
    if code.is_empty() {
        return Err(Status::invalid_params(format!("{key}IsEmpty")));
    }
    parse_currency(code)
        .map(|_| ())
        .ok_or_else(|| Status::with_message(ServerError::MalformedCurrency, "malformedCurrency"))
}

fn check_issuer(value: &Value, key: &str) -> Result<(), Status> {
    let Some(issuer) = value.as_str() else {
        return Err(Status::invalid_params(format!(
            "Invalid field '{key}', not string."
        )));
    };

    match parse_issuer(issuer) {
        None => Err(Status::invalid_params(format!(
            "Invalid field '{key}', bad issuer."
        ))),
        Some(account) if account == AccountId::ONE => Err(Status::invalid_params(format!(
            "Invalid field '{key}', bad issuer account one."
        ))),
        Some(_) => Ok(()),
    }
}

fn check_subscribe_streams(value: &Value, key: &str) -> Result<(), Status> {
    let streams = value
        .as_array()
        .ok_or_else(|| Status::invalid_params(format!("{key}NotArray")))?;

    for stream in streams {
        let name = stream
            .as_str()
            .ok_or_else(|| Status::invalid_params("streamNotString"))?;

        if REPORTING_UNSUPPORTED_STREAMS.contains(&name) {
            return Err(Status::new(ProtocolError::ReportingUnsupported));
        }
        if !VALID_STREAMS.contains(&name) {
            return Err(Status::with_message(
                ProtocolError::StreamMalformed,
                format!("Stream malformed: '{name}'"),
            ));
        }
    }
    Ok(())
}

fn check_subscribe_accounts(value: &Value, key: &str) -> Result<(), Status> {
    let accounts = value
        .as_array()
        .ok_or_else(|| Status::invalid_params(format!("{key}NotArray")))?;

    if accounts.is_empty() {
        return Err(Status::with_message(
            ProtocolError::ActMalformed,
            format!("{key} malformed."),
        ));
    }

    let item_key = format!("{key}'sItem");
    for (i, account) in accounts.iter().enumerate() {
        check_account(account, &item_key)
            .map_err(|status| Status::with_message(status.code, format!("{} at index {i}", status.message())))?;
    }
    Ok(())
}

fn check_currency_issue(value: &Value, key: &str) -> Result<(), Status> {
    let issue = value
        .as_object()
        .ok_or_else(|| Status::invalid_params(format!("{key}NotObject")))?;

    parse_issue(issue)
        .map(|_| ())
        .ok_or_else(|| Status::new(ServerError::MalformedRequest))
}

/// Unsigned sequence, `"validated"`, or a digit string fitting 32 bits
pub fn ledger_index() -> Step {
    custom(check_ledger_index)
}

/// Base58 address, or a public key in hex or base58 form
pub fn account() -> Step {
    custom(check_account)
}

/// Strict non-zero base58 address
pub fn account_base58() -> Step {
    custom(check_account_base58)
}

pub fn account_marker() -> Step {
    custom(check_account_marker)
}

pub fn uint256_hex_string() -> Step {
    custom(check_uint256)
}

pub fn currency() -> Step {
    custom(check_currency)
}

pub fn issuer() -> Step {
    custom(check_issuer)
}

pub fn subscribe_streams() -> Step {
    custom(check_subscribe_streams)
}

pub fn subscribe_accounts() -> Step {
    custom(check_subscribe_accounts)
}

pub fn currency_issue() -> Step {
    custom(check_currency_issue)
}

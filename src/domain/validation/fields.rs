//! Typed access to a request object that already passed its specification

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::bounds::{Bound, Conversion};
use super::catalogue::{parse_account_cursor, parse_issue, parse_ledger_index, AccountCursor, Issue, LedgerIndex};
use super::codec::{parse_currency, parse_issuer, AccountId, Currency};
use super::types::{field, ContractViolation};
use crate::domain::json_bool::JsonBool;

/// Read-only view over validated fields.
///
/// Every accessor treats an absent or null field as `None`. A present value
/// that does not convert means the specification let it through by mistake,
/// which is reported as a [`ContractViolation`].
pub struct ValidatedFields<'a> {
    command: &'static str,
    object: &'a Value,
}

impl<'a> ValidatedFields<'a> {
    pub fn new(command: &'static str, object: &'a Value) -> Self {
        Self { command, object }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        field(self.object, key).filter(|value| !value.is_null())
    }

    fn violation(&self, key: &str, expected: &str) -> ContractViolation {
        ContractViolation::Conversion {
            command: self.command,
            reason: format!("field '{key}' is not {expected}"),
        }
    }

    pub fn opt<T: Bound>(&self, key: &str) -> Result<Option<T>, ContractViolation> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match T::convert(value) {
            Conversion::Exact(v) => Ok(Some(v)),
            _ => Err(self.violation(key, T::EXPECTED)),
        }
    }

    pub fn req<T: Bound>(&self, key: &str) -> Result<T, ContractViolation> {
        self.opt(key)?
            .ok_or_else(|| self.violation(key, "present"))
    }

    /// Deserialize a structured field with serde
    pub fn opt_deserialize<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ContractViolation> {
        self.get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|err| ContractViolation::Conversion {
                    command: self.command,
                    reason: format!("field '{key}': {err}"),
                })
            })
            .transpose()
    }

    /// Lenient flag: absent means false
    pub fn flag(&self, key: &str) -> JsonBool {
        self.get(key).map(JsonBool::from).unwrap_or_default()
    }

    pub fn ledger_index(&self, key: &str) -> Result<Option<LedgerIndex>, ContractViolation> {
        self.get(key)
            .map(|value| parse_ledger_index(value).ok_or_else(|| self.violation(key, "a ledger index")))
            .transpose()
    }

    pub fn account_cursor(&self, key: &str) -> Result<Option<AccountCursor>, ContractViolation> {
        self.get(key)
            .map(|value| {
                value
                    .as_str()
                    .and_then(parse_account_cursor)
                    .ok_or_else(|| self.violation(key, "an account cursor"))
            })
            .transpose()
    }

    pub fn issue(&self, key: &str) -> Result<Option<Issue>, ContractViolation> {
        self.get(key)
            .map(|value| {
                value
                    .as_object()
                    .and_then(parse_issue)
                    .ok_or_else(|| self.violation(key, "a currency issue"))
            })
            .transpose()
    }

    pub fn strings(&self, key: &str) -> Result<Option<Vec<String>>, ContractViolation> {
        self.opt_deserialize(key)
    }

    pub fn currency(&self, key: &str) -> Result<Option<Currency>, ContractViolation> {
        self.get(key)
            .map(|value| {
                value
                    .as_str()
                    .and_then(parse_currency)
                    .ok_or_else(|| self.violation(key, "a currency"))
            })
            .transpose()
    }

    /// Issuer in hex or base58 form
    pub fn issuer(&self, key: &str) -> Result<Option<AccountId>, ContractViolation> {
        self.get(key)
            .map(|value| {
                value
                    .as_str()
                    .and_then(parse_issuer)
                    .ok_or_else(|| self.violation(key, "an issuer"))
            })
            .transpose()
    }

    /// View over a nested object field
    pub fn section(&self, key: &str) -> Option<ValidatedFields<'a>> {
        self.get(key)
            .filter(|value| value.is_object())
            .map(|object| ValidatedFields::new(self.command, object))
    }
}

/// Build a typed input from validated fields
pub trait FromValidated: Sized {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation>;
}

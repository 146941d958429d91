//! `account_lines`: trust lines of an account

use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::rpc::{ProtocolError, Status};
use crate::domain::validation::catalogue::{account, account_marker, ledger_index, uint256_hex_string, AccountCursor, LedgerIndex};
use crate::domain::validation::checker::JsonType;
use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::meta::with_custom_error;
use crate::domain::validation::modifiers::clamp;
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, FieldSpec, RpcSpec};
use crate::domain::validation::validators::{deprecated, is, min, required};

pub const LIMIT_MIN: u32 = 10;
pub const LIMIT_MAX: u32 = 400;
pub const LIMIT_DEFAULT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountLinesInput {
    pub account: String,
    pub peer: Option<String>,
    pub ignore_default: bool,
    pub ledger_hash: Option<String>,
    pub ledger_index: Option<LedgerIndex>,
    pub limit: u32,
    pub marker: Option<AccountCursor>,
}

impl FromValidated for AccountLinesInput {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        Ok(Self {
            account: fields.req("account")?,
            peer: fields.opt("peer")?,
            ignore_default: fields.opt("ignore_default")?.unwrap_or(false),
            ledger_hash: fields.opt("ledger_hash")?,
            ledger_index: fields.ledger_index("ledger_index")?,
            limit: fields.opt("limit")?.unwrap_or(LIMIT_DEFAULT),
            marker: fields.account_cursor("marker")?,
        })
    }
}

static SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::new([
        FieldSpec::new("account", [required(), account()]),
        FieldSpec::new(
            "peer",
            [with_custom_error(account(), Status::new(ProtocolError::ActMalformed))],
        ),
        FieldSpec::new("ignore_default", [is(JsonType::Bool)]),
        FieldSpec::new("ledger_hash", [uint256_hex_string()]),
        FieldSpec::new(
            "limit",
            [is(JsonType::Unsigned), min(1u32), clamp(LIMIT_MIN, LIMIT_MAX)],
        ),
        FieldSpec::new("ledger_index", [ledger_index()]),
        FieldSpec::new("marker", [account_marker()]),
        FieldSpec::new("ledger", [deprecated()]),
    ])
});

pub struct AccountLines;

impl RpcCommand for AccountLines {
    const NAME: &'static str = "account_lines";
    type Input = AccountLinesInput;

    fn spec(_api_version: u32) -> &'static RpcSpec {
        &SPEC
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<AccountLines>();
}

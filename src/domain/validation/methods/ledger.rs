//! `ledger`: header and optional contents of one ledger

use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::validation::catalogue::{ledger_index, uint256_hex_string, LedgerIndex};
use crate::domain::validation::checker::JsonType;
use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, FieldSpec, RpcSpec};
use crate::domain::validation::validators::{deprecated, is, not_supported_value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerInput {
    pub ledger_hash: Option<String>,
    pub ledger_index: Option<LedgerIndex>,
    pub binary: bool,
    pub expand: bool,
    pub owner_funds: bool,
    pub transactions: bool,
    pub diff: bool,
}

impl FromValidated for LedgerInput {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        let bool_field = |key: &str| -> Result<bool, ContractViolation> { Ok(fields.opt(key)?.unwrap_or(false)) };

        Ok(Self {
            ledger_hash: fields.opt("ledger_hash")?,
            ledger_index: fields.ledger_index("ledger_index")?,
            binary: bool_field("binary")?,
            expand: bool_field("expand")?,
            owner_funds: bool_field("owner_funds")?,
            transactions: bool_field("transactions")?,
            diff: bool_field("diff")?,
        })
    }
}

fn unsupported_when_set(key: &str) -> FieldSpec {
    FieldSpec::new(key, [is(JsonType::Bool), not_supported_value(true)])
}

fn flag(key: &str) -> FieldSpec {
    FieldSpec::new(key, [is(JsonType::Bool)])
}

static SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::new([
        unsupported_when_set("full"),
        unsupported_when_set("accounts"),
        flag("owner_funds"),
        unsupported_when_set("queue"),
        FieldSpec::new("ledger_hash", [uint256_hex_string()]),
        FieldSpec::new("ledger_index", [ledger_index()]),
        flag("transactions"),
        flag("expand"),
        flag("binary"),
        flag("diff"),
        FieldSpec::new("type", [deprecated()]),
    ])
});

pub struct Ledger;

impl RpcCommand for Ledger {
    const NAME: &'static str = "ledger";
    type Input = LedgerInput;

    fn spec(_api_version: u32) -> &'static RpcSpec {
        &SPEC
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<Ledger>();
}

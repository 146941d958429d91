//! `account_tx`: transactions that touched an account

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::tx_types::TRANSACTION_TYPES_LOWERCASE;
use crate::domain::json_bool::JsonBool;
use crate::domain::rpc::Status;
use crate::domain::validation::catalogue::{account, ledger_index, uint256_hex_string, LedgerIndex};
use crate::domain::validation::checker::JsonType;
use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::meta::{section, with_custom_error};
use crate::domain::validation::modifiers::{clamp, to_lower};
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, FieldSpec, RpcSpec};
use crate::domain::validation::validators::{between, is, max, min, one_of, required};

/// No upper limit; values are clamped into `i32` range
pub const LIMIT_MIN: i32 = 1;

/// Resume position of a previous page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxMarker {
    pub ledger: u32,
    pub seq: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountTxInput {
    pub account: String,
    pub ledger_hash: Option<String>,
    pub ledger_index: Option<LedgerIndex>,
    pub ledger_index_min: Option<i32>,
    pub ledger_index_max: Option<i32>,
    pub binary: JsonBool,
    pub forward: JsonBool,
    pub limit: Option<u32>,
    pub marker: Option<TxMarker>,
    /// Lower-cased transaction type filter
    pub tx_type: Option<String>,
}

impl FromValidated for AccountTxInput {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        Ok(Self {
            account: fields.req("account")?,
            ledger_hash: fields.opt("ledger_hash")?,
            ledger_index: fields.ledger_index("ledger_index")?,
            ledger_index_min: fields.opt("ledger_index_min")?,
            ledger_index_max: fields.opt("ledger_index_max")?,
            binary: fields.flag("binary"),
            forward: fields.flag("forward"),
            limit: fields.opt("limit")?,
            marker: fields.opt_deserialize("marker")?,
            tx_type: fields.opt("tx_type")?,
        })
    }
}

fn marker_field(key: &str) -> FieldSpec {
    FieldSpec::new(key, [required(), is(JsonType::Unsigned), max(u32::MAX)])
}

static SPEC_V1: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::new([
        FieldSpec::new("account", [required(), account()]),
        FieldSpec::new("ledger_hash", [uint256_hex_string()]),
        FieldSpec::new("ledger_index", [ledger_index()]),
        FieldSpec::new(
            "ledger_index_min",
            [is(JsonType::Integer), between(i32::MIN, i32::MAX)],
        ),
        FieldSpec::new(
            "ledger_index_max",
            [is(JsonType::Integer), between(i32::MIN, i32::MAX)],
        ),
        FieldSpec::new(
            "limit",
            [is(JsonType::Unsigned), min(1u32), clamp(LIMIT_MIN, i32::MAX)],
        ),
        FieldSpec::new(
            "marker",
            [
                with_custom_error(is(JsonType::Object), Status::invalid_params("invalidMarker")),
                section([marker_field("ledger"), marker_field("seq")]),
            ],
        ),
        FieldSpec::new(
            "tx_type",
            [
                is(JsonType::String),
                to_lower(),
                one_of(TRANSACTION_TYPES_LOWERCASE.iter().cloned()),
            ],
        ),
    ])
});

static SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::extend(
        &SPEC_V1,
        [
            FieldSpec::new("binary", [is(JsonType::Bool)]),
            FieldSpec::new("forward", [is(JsonType::Bool)]),
        ],
    )
});

pub struct AccountTx;

impl RpcCommand for AccountTx {
    const NAME: &'static str = "account_tx";
    type Input = AccountTxInput;

    fn spec(api_version: u32) -> &'static RpcSpec {
        if api_version == 1 {
            &SPEC_V1
        } else {
            &SPEC
        }
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<AccountTx>();
}

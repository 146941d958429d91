//! `amm_info`: automated market maker state, by asset pair or AMM account

use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::rpc::{ProtocolError, Status};
use crate::domain::validation::catalogue::{account, currency_issue, ledger_index, uint256_hex_string, Issue, LedgerIndex};
use crate::domain::validation::checker::JsonType;
use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::meta::{if_type, with_custom_error};
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, FieldSpec, RpcSpec, Step};
use crate::domain::validation::validators::is;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmmInfoInput {
    pub asset: Option<Issue>,
    pub asset2: Option<Issue>,
    pub amm_account: Option<String>,
    pub account: Option<String>,
    pub ledger_hash: Option<String>,
    pub ledger_index: Option<LedgerIndex>,
}

impl FromValidated for AmmInfoInput {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        Ok(Self {
            asset: fields.issue("asset")?,
            asset2: fields.issue("asset2")?,
            amm_account: fields.opt("amm_account")?,
            account: fields.opt("account")?,
            ledger_hash: fields.opt("ledger_hash")?,
            ledger_index: fields.ledger_index("ledger_index")?,
        })
    }
}

fn issue_malformed(step: Step) -> Step {
    with_custom_error(step, Status::new(ProtocolError::IssueMalformed))
}

fn asset_field(key: &str) -> FieldSpec {
    FieldSpec::new(
        key,
        [
            issue_malformed(is(JsonType::Object)),
            if_type(JsonType::Object, [issue_malformed(currency_issue())]),
        ],
    )
}

fn account_field(key: &str) -> FieldSpec {
    FieldSpec::new(
        key,
        [with_custom_error(account(), Status::new(ProtocolError::ActMalformed))],
    )
}

static SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::new([
        asset_field("asset"),
        asset_field("asset2"),
        account_field("amm_account"),
        account_field("account"),
        FieldSpec::new("ledger_hash", [uint256_hex_string()]),
        FieldSpec::new("ledger_index", [ledger_index()]),
    ])
});

pub struct AmmInfo;

impl RpcCommand for AmmInfo {
    const NAME: &'static str = "amm_info";
    type Input = AmmInfoInput;

    fn spec(_api_version: u32) -> &'static RpcSpec {
        &SPEC
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<AmmInfo>();
}

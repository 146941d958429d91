//! `account_info`: account root and optional signer lists

use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::json_bool::JsonBool;
use crate::domain::validation::catalogue::{account, ledger_index, uint256_hex_string, LedgerIndex};
use crate::domain::validation::checker::JsonType;
use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, FieldSpec, RpcSpec};
use crate::domain::validation::validators::is;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountInfoInput {
    pub account: Option<String>,
    /// Older alias of `account`
    pub ident: Option<String>,
    pub ledger_hash: Option<String>,
    pub ledger_index: Option<LedgerIndex>,
    pub signer_lists: JsonBool,
}

impl FromValidated for AccountInfoInput {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        Ok(Self {
            account: fields.opt("account")?,
            ident: fields.opt("ident")?,
            ledger_hash: fields.opt("ledger_hash")?,
            ledger_index: fields.ledger_index("ledger_index")?,
            signer_lists: fields.flag("signer_lists"),
        })
    }
}

static SPEC_V1: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::new([
        FieldSpec::new("account", [account()]),
        FieldSpec::new("ident", [account()]),
        FieldSpec::new("ledger_hash", [uint256_hex_string()]),
        FieldSpec::new("ledger_index", [ledger_index()]),
    ])
});

static SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::extend(&SPEC_V1, [FieldSpec::new("signer_lists", [is(JsonType::Bool)])])
});

pub struct AccountInfo;

impl RpcCommand for AccountInfo {
    const NAME: &'static str = "account_info";
    type Input = AccountInfoInput;

    fn spec(api_version: u32) -> &'static RpcSpec {
        if api_version == 1 {
            &SPEC_V1
        } else {
            &SPEC
        }
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<AccountInfo>();
}

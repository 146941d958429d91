//! `book_offers`: offers between two currencies

use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::rpc::{ProtocolError, Status};
use crate::domain::validation::catalogue::{account, currency, issuer, ledger_index, uint256_hex_string, LedgerIndex};
use crate::domain::validation::checker::JsonType;
use crate::domain::validation::codec::{AccountId, Currency};
use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::meta::{section, with_custom_error};
use crate::domain::validation::modifiers::clamp;
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, FieldSpec, RpcSpec};
use crate::domain::validation::validators::{is, min, required};

pub const LIMIT_MIN: u32 = 1;
pub const LIMIT_MAX: u32 = 100;
pub const LIMIT_DEFAULT: u32 = 60;

/// One side of an order book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSide {
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<AccountId>,
}

impl BookSide {
    fn from_section(fields: &ValidatedFields<'_>, key: &str) -> Result<Self, ContractViolation> {
        let side = fields.section(key).ok_or_else(|| ContractViolation::Conversion {
            command: BookOffers::NAME,
            reason: format!("field '{key}' is not an object"),
        })?;

        Ok(Self {
            currency: side.currency("currency")?.unwrap_or(Currency::Native),
            issuer: side.issuer("issuer")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookOffersInput {
    pub taker_gets: BookSide,
    pub taker_pays: BookSide,
    pub taker: Option<String>,
    pub ledger_hash: Option<String>,
    pub ledger_index: Option<LedgerIndex>,
    pub limit: u32,
}

impl FromValidated for BookOffersInput {
    fn from_validated(fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        Ok(Self {
            taker_gets: BookSide::from_section(fields, "taker_gets")?,
            taker_pays: BookSide::from_section(fields, "taker_pays")?,
            taker: fields.opt("taker")?,
            ledger_hash: fields.opt("ledger_hash")?,
            ledger_index: fields.ledger_index("ledger_index")?,
            limit: fields.opt("limit")?.unwrap_or(LIMIT_DEFAULT),
        })
    }
}

fn book_side(key: &str, currency_error: ProtocolError, issuer_error: ProtocolError) -> FieldSpec {
    FieldSpec::new(
        key,
        [
            required(),
            is(JsonType::Object),
            section([
                FieldSpec::new(
                    "currency",
                    [required(), with_custom_error(currency(), Status::new(currency_error))],
                ),
                FieldSpec::new("issuer", [with_custom_error(issuer(), Status::new(issuer_error))]),
            ]),
        ],
    )
}

static SPEC: LazyLock<RpcSpec> = LazyLock::new(|| {
    RpcSpec::new([
        book_side(
            "taker_gets",
            ProtocolError::DstAmtMalformed,
            ProtocolError::DstIsrMalformed,
        ),
        book_side(
            "taker_pays",
            ProtocolError::SrcCurMalformed,
            ProtocolError::SrcIsrMalformed,
        ),
        FieldSpec::new(
            "taker",
            [with_custom_error(
                account(),
                Status::invalid_params("Invalid field 'taker'."),
            )],
        ),
        FieldSpec::new(
            "limit",
            [is(JsonType::Unsigned), min(1u32), clamp(LIMIT_MIN, LIMIT_MAX)],
        ),
        FieldSpec::new("ledger_hash", [uint256_hex_string()]),
        FieldSpec::new("ledger_index", [ledger_index()]),
    ])
});

pub struct BookOffers;

impl RpcCommand for BookOffers {
    const NAME: &'static str = "book_offers";
    type Input = BookOffersInput;

    fn spec(_api_version: u32) -> &'static RpcSpec {
        &SPEC
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<BookOffers>();
}

//! Transaction type names accepted by `tx_type` filters

use std::sync::LazyLock;

pub const TRANSACTION_TYPES: &[&str] = &[
    "Payment",
    "EscrowCreate",
    "EscrowFinish",
    "AccountSet",
    "EscrowCancel",
    "SetRegularKey",
    "OfferCreate",
    "OfferCancel",
    "TicketCreate",
    "SignerListSet",
    "PaymentChannelCreate",
    "PaymentChannelFund",
    "PaymentChannelClaim",
    "CheckCreate",
    "CheckCash",
    "CheckCancel",
    "DepositPreauth",
    "TrustSet",
    "AccountDelete",
    "NFTokenMint",
    "NFTokenBurn",
    "NFTokenCreateOffer",
    "NFTokenCancelOffer",
    "NFTokenAcceptOffer",
    "Clawback",
    "AMMCreate",
    "AMMDeposit",
    "AMMWithdraw",
    "AMMVote",
    "AMMBid",
    "AMMDelete",
    "XChainCreateClaimID",
    "XChainCommit",
    "XChainClaim",
    "XChainAccountCreateCommit",
    "XChainAddClaimAttestation",
    "XChainAddAccountCreateAttestation",
    "XChainModifyBridge",
    "XChainCreateBridge",
    "DIDSet",
    "DIDDelete",
    "EnableAmendment",
    "SetFee",
    "UNLModify",
];

/// Lower-cased names, matched after a `to_lower` step
pub static TRANSACTION_TYPES_LOWERCASE: LazyLock<Vec<String>> =
    LazyLock::new(|| TRANSACTION_TYPES.iter().map(|name| name.to_lowercase()).collect());

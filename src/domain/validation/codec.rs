//! Ledger identifier codecs
//!
//! Base58check tokens use the ledger's own alphabet and a four byte double
//! SHA-256 checksum. Hex identifiers accept either letter case.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Leading byte of a base58check token, naming what it encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenType {
    AccountId = 0x00,
    NodePublic = 0x1C,
    AccountPublic = 0x23,
}

const CHECKSUM_LEN: usize = 4;

const ACCOUNT_ID_LEN: usize = 20;
const PUBLIC_KEY_LEN: usize = 33;

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Decode a base58check string of the given token type, returning the body
pub fn decode_base58_token(encoded: &str, token: TokenType) -> Option<Vec<u8>> {
    let raw = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .ok()?;

    if raw.len() <= 1 + CHECKSUM_LEN || raw[0] != token as u8 {
        return None;
    }

    let (payload, check) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(payload).as_slice() != check {
        return None;
    }

    Some(payload[1..].to_vec())
}

/// Encode `body` as a base58check string of the given token type
pub fn encode_base58_token(body: &[u8], token: TokenType) -> String {
    let mut raw = Vec::with_capacity(1 + body.len() + CHECKSUM_LEN);
    raw.push(token as u8);
    raw.extend_from_slice(body);
    let check = checksum(&raw);
    raw.extend_from_slice(&check);

    bs58::encode(raw)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

/// 160-bit account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    pub const ZERO: AccountId = AccountId([0; ACCOUNT_ID_LEN]);

    /// Sentinel account with value 1, never a valid issuer
    pub const ONE: AccountId = {
        let mut bytes = [0; ACCOUNT_ID_LEN];
        bytes[ACCOUNT_ID_LEN - 1] = 1;
        AccountId(bytes)
    };

    pub fn from_bytes(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_base58(encoded: &str) -> Option<Self> {
        let body = decode_base58_token(encoded, TokenType::AccountId)?;
        body.try_into().ok().map(Self)
    }

    /// Parse exactly 40 hex characters
    pub fn from_hex(encoded: &str) -> Option<Self> {
        if encoded.len() != ACCOUNT_ID_LEN * 2 {
            return None;
        }
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        hex::decode_to_slice(encoded, &mut bytes).ok()?;
        Some(Self(bytes))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        encode_base58_token(&self.0, TokenType::AccountId)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether `bytes` look like a secp256k1 compressed or ed25519 public key
pub fn is_public_key(bytes: &[u8]) -> bool {
    bytes.len() == PUBLIC_KEY_LEN && matches!(bytes[0], 0x02 | 0x03 | 0xED)
}

/// Something that names an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRef {
    Address(AccountId),
    PublicKey(Vec<u8>),
}

/// Accept a hex public key, a base58 public key, or a base58 account address
pub fn parse_account(encoded: &str) -> Option<AccountRef> {
    if let Ok(bytes) = hex::decode(encoded) {
        if is_public_key(&bytes) {
            return Some(AccountRef::PublicKey(bytes));
        }
    }

    if let Some(bytes) = decode_base58_token(encoded, TokenType::AccountPublic) {
        if is_public_key(&bytes) {
            return Some(AccountRef::PublicKey(bytes));
        }
    }

    AccountId::from_base58(encoded).map(AccountRef::Address)
}

/// Parse exactly 64 hex characters into a 256-bit identifier
pub fn parse_uint256(encoded: &str) -> Option<[u8; 32]> {
    if encoded.len() != 64 {
        return None;
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(encoded, &mut bytes).ok()?;
    Some(bytes)
}

static ISO_CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9<>(){}\[\]|?!@#$%^&*]{3}$").expect("currency pattern compiles")
});

/// Native asset code
pub const NATIVE_CURRENCY: &str = "XRP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Currency {
    Native,
    Iso(String),
    Hex([u8; ACCOUNT_ID_LEN]),
}

impl Currency {
    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Native => f.write_str(NATIVE_CURRENCY),
            Currency::Iso(code) => f.write_str(code),
            Currency::Hex(bytes) => f.write_str(&hex::encode_upper(bytes)),
        }
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a currency code: empty or `XRP` for the native asset, a three
/// character ISO-style code, or 40 hex characters
pub fn parse_currency(code: &str) -> Option<Currency> {
    if code.is_empty() || code == NATIVE_CURRENCY {
        return Some(Currency::Native);
    }

    if ISO_CURRENCY.is_match(code) {
        return Some(Currency::Iso(code.to_string()));
    }

    let hex = AccountId::from_hex(code)?;
    if hex.is_zero() {
        Some(Currency::Native)
    } else {
        Some(Currency::Hex(*hex.as_bytes()))
    }
}

/// Parse an issuer given as 40 hex characters or a base58 account address
pub fn parse_issuer(encoded: &str) -> Option<AccountId> {
    AccountId::from_hex(encoded).or_else(|| AccountId::from_base58(encoded))
}

/// Non-empty, digits only, and representable as `T`
pub fn is_unsigned_integer_string<T: FromStr>(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && s.parse::<T>().is_ok()
}

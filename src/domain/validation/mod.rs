//! Domain validation module
//!
//! This module contains the declarative parameter validation engine: the
//! step capabilities, field and command specifications, the ledger-specific
//! validator catalogue and the per-command specifications built from them.

pub mod bounds;
pub mod catalogue;
pub mod checker;
pub mod codec;
pub mod engine;
pub mod fields;
pub mod meta;
pub mod methods;
pub mod modifiers;
pub mod registry;
pub mod types;
pub mod validators;

pub use bounds::{Bound, Conversion};
pub use catalogue::{AccountCursor, Issue, LedgerIndex};
pub use checker::JsonType;
pub use engine::{validate, validate_with, RpcCommand, Validated};
pub use fields::{FromValidated, ValidatedFields};
pub use registry::{CommandEntry, CommandInput, MethodRegistry};
pub use types::{
    ContractViolation, FieldSpec, MetaProcessor, Modifier, Outcome, RpcSpec, Step, Validator,
};

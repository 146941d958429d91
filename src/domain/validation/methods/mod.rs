//! Command specifications
//!
//! One module per RPC command. Each module owns its versioned specification,
//! its typed input and a `register` function for the method registry.

pub mod account_info;
pub mod account_lines;
pub mod account_tx;
pub mod amm_info;
pub mod book_offers;
pub mod ledger;
pub mod random;
pub mod subscribe;
pub mod tx_types;

use super::registry::MethodRegistry;

pub use account_info::{AccountInfo, AccountInfoInput};
pub use account_lines::{AccountLines, AccountLinesInput};
pub use account_tx::{AccountTx, AccountTxInput, TxMarker};
pub use amm_info::{AmmInfo, AmmInfoInput};
pub use book_offers::{BookOffers, BookOffersInput, BookSide};
pub use ledger::{Ledger, LedgerInput};
pub use random::{Random, RandomInput};
pub use subscribe::{BookSubscription, Subscribe, SubscribeInput};

/// Register every command this server validates
pub fn register_all(registry: &mut MethodRegistry) {
    account_info::register(registry);
    account_lines::register(registry);
    account_tx::register(registry);
    amm_info::register(registry);
    book_offers::register(registry);
    ledger::register(registry);
    random::register(registry);
    subscribe::register(registry);
}

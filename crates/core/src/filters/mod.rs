//! Filter/search layer applied on top of merged balances and bank transactions.

mod date_presets;
mod filter_store;
mod filters_model;
mod filters_service;

pub use date_presets::{PresetRange, QuickRange};
pub use filter_store::{FilterStore, KeyValueStoreTrait};
pub use filters_model::{BalanceSign, DateRange, FilterState, TransactionTypeFilter};
pub use filters_service::{
    balance_matches, filter_balances, filter_transactions, transaction_matches,
};

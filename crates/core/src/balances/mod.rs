//! Balances module - cross-company merge of ERP aging data.

mod balances_merger;
mod balances_model;
mod balances_service;
mod balances_traits;

pub use balances_merger::merge_balances;
pub use balances_model::{BalanceTotals, MergedBalance, OverdueDetail};
pub use balances_service::{ConsolidatedView, ConsolidationService, SourceState};
pub use balances_traits::ConsolidationServiceTrait;

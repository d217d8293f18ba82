//! Bank module - transactions, per-bank cash-flow summaries and the
//! reconciliation status lifecycle.

mod bank_model;
mod bank_service;
mod bank_summary;
mod bank_traits;
mod reconciliation;
mod transaction_store;

pub use bank_model::{BankAccount, BankTransaction, TransactionKind};
pub use bank_service::BankService;
pub use bank_summary::{summarize, BankSummary, BankSummaryReport, StatusCounts, TOTAL_BANK_ID};
pub use bank_traits::{BankRepositoryTrait, BankServiceTrait};
pub use reconciliation::{ReconciliationError, ReconciliationStatus};
pub use transaction_store::TransactionStore;

//! Bank domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::reconciliation::ReconciliationStatus;

/// Direction of a transaction, derived from the sign of its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Inflow,
    Outflow,
}

/// A transaction from the bank feed.
///
/// Everything except `status` (and the matched ERP code that comes with it)
/// is immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransaction {
    pub id: String,
    pub bank_account_id: String,
    /// Bank name embedded by the feed, used when the account is unknown
    pub bank_name: Option<String>,
    /// Positive = inflow, negative = outflow
    pub amount: Decimal,
    /// Running account balance after this transaction
    pub balance_after: Decimal,
    pub counterparty_name: Option<String>,
    pub counterparty_iban: Option<String>,
    pub description: Option<String>,
    /// Business (value) date
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ReconciliationStatus,
    pub erp_account_code: Option<String>,
}

impl BankTransaction {
    pub fn kind(&self) -> TransactionKind {
        if self.amount > Decimal::ZERO {
            TransactionKind::Inflow
        } else {
            TransactionKind::Outflow
        }
    }
}

/// Bank account reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub name: String,
    /// Owning ERP company
    pub company_id: String,
    /// ERP ledger code of the bank account
    pub ledger_code: String,
}

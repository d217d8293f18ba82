//! Bank feed repository and service traits.

use async_trait::async_trait;

use super::bank_model::{BankAccount, BankTransaction};
use super::bank_summary::BankSummaryReport;
use super::reconciliation::ReconciliationStatus;
use crate::errors::Result;
use crate::filters::FilterState;

/// Contract for the banking backend.
///
/// The backend applies `filter` server-side; implementations that cannot do
/// so may return a superset, since the service filters again client-side.
#[async_trait]
pub trait BankRepositoryTrait: Send + Sync {
    async fn list_transactions(&self, filter: &FilterState) -> Result<Vec<BankTransaction>>;

    async fn list_bank_accounts(&self) -> Result<Vec<BankAccount>>;

    /// Persists a status change. An `Err` means the backend rejected it.
    async fn update_status(
        &self,
        transaction_id: &str,
        status: ReconciliationStatus,
    ) -> Result<()>;
}

/// Contract for bank screen operations.
#[async_trait]
pub trait BankServiceTrait: Send + Sync {
    /// Transactions matching `filter`, served from cache while fresh.
    async fn list_transactions(&self, filter: &FilterState) -> Result<Vec<BankTransaction>>;

    /// Bank account reference data, served from cache while fresh.
    async fn bank_accounts(&self) -> Result<Vec<BankAccount>>;

    /// Per-bank and grand totals over the transactions matching `filter`.
    async fn summary(&self, filter: &FilterState) -> Result<BankSummaryReport>;

    /// Re-fetches transactions and bank accounts concurrently, ignoring cache.
    async fn refresh(&self, filter: &FilterState) -> Result<BankSummaryReport>;

    /// Changes a transaction's reconciliation status.
    ///
    /// Rejected locally when the lifecycle forbids the change; rolled back
    /// when the backend refuses it.
    async fn update_status(
        &self,
        transaction_id: &str,
        status: ReconciliationStatus,
    ) -> Result<BankTransaction>;

    /// Transactions from the last fetch, without contacting the backend.
    fn cached_transactions(&self) -> Result<Vec<BankTransaction>>;
}

//! Source traits for ERP and customer-system lookups.
//!
//! Implementations own the transport (HTTP, SQL, cache); the engine only
//! sees already-deserialized records.

use async_trait::async_trait;

use super::aging_model::{AccountName, AgingRecord, CustomerName};
use crate::errors::Result;

/// Per-company ERP queries. Every call is independent of the others.
#[async_trait]
pub trait AgingRepositoryTrait: Send + Sync {
    /// Aging rows for one company and fiscal year.
    async fn fetch_aging(&self, fiscal_year: i32, company_id: &str) -> Result<Vec<AgingRecord>>;

    /// Ledger account names for one company and fiscal year.
    async fn fetch_account_names(
        &self,
        fiscal_year: i32,
        company_id: &str,
    ) -> Result<Vec<AccountName>>;
}

/// External customer system keyed by the same account codes.
#[async_trait]
pub trait CustomerDirectoryTrait: Send + Sync {
    async fn fetch_customers(&self) -> Result<Vec<CustomerName>>;
}

use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::{Arc, RwLock};

use super::bank_model::{BankAccount, BankTransaction};
use super::bank_summary::{summarize, BankSummaryReport};
use super::bank_traits::{BankRepositoryTrait, BankServiceTrait};
use super::reconciliation::{ReconciliationError, ReconciliationStatus};
use super::transaction_store::TransactionStore;
use crate::cache::CachedEntry;
use crate::config::EngineConfig;
use crate::errors::{Error, Result};
use crate::filters::{filter_transactions, FilterState, QuickRange};

/// Service for bank transactions, summaries and status changes.
pub struct BankService {
    repository: Arc<dyn BankRepositoryTrait>,
    config: EngineConfig,
    store: TransactionStore,
    accounts: RwLock<Option<CachedEntry<Vec<BankAccount>>>>,
}

impl BankService {
    pub fn new(repository: Arc<dyn BankRepositoryTrait>, config: EngineConfig) -> Self {
        Self {
            repository,
            config,
            store: TransactionStore::new(),
            accounts: RwLock::new(None),
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    /// `base` with its date range replaced by `preset`, resolved now in the
    /// configured business timezone.
    pub fn with_preset(&self, base: &FilterState, preset: QuickRange) -> Result<FilterState> {
        let range = self.config.resolve_preset(preset)?;
        Ok(FilterState {
            date_range: range.to_date_range(),
            ..base.clone()
        })
    }

    fn cached_accounts(&self, fresh_only: bool) -> Result<Option<Vec<BankAccount>>> {
        let guard = self
            .accounts
            .read()
            .map_err(|e| Error::Unexpected(format!("Bank account cache lock poisoned: {}", e)))?;
        Ok(guard
            .as_ref()
            .filter(|entry| !fresh_only || entry.is_fresh(self.config.bank_accounts_ttl()))
            .map(|entry| entry.value.clone()))
    }

    async fn load_accounts(&self, force: bool) -> Result<Vec<BankAccount>> {
        if !force {
            if let Some(accounts) = self.cached_accounts(true)? {
                return Ok(accounts);
            }
        }
        let accounts = self.repository.list_bank_accounts().await?;
        debug!("Fetched {} bank accounts", accounts.len());
        let mut guard = self
            .accounts
            .write()
            .map_err(|e| Error::Unexpected(format!("Bank account cache lock poisoned: {}", e)))?;
        *guard = Some(CachedEntry::new(accounts.clone()));
        Ok(accounts)
    }

    async fn load_transactions(
        &self,
        filter: &FilterState,
        force: bool,
    ) -> Result<Vec<BankTransaction>> {
        if !force {
            if let Some(transactions) = self
                .store
                .snapshot_if_fresh(filter, self.config.transactions_ttl())?
            {
                return Ok(transactions);
            }
        }
        let transactions = self.repository.list_transactions(filter).await?;
        debug!("Fetched {} bank transactions", transactions.len());
        self.store.replace(filter, transactions.clone())?;
        Ok(transactions)
    }

    /// Fetches both lists concurrently and applies the client-side filter.
    ///
    /// A failed bank-account fetch only costs display names, so it degrades to
    /// the last cached list instead of failing the call.
    async fn collect(
        &self,
        filter: &FilterState,
        force: bool,
    ) -> Result<(Vec<BankTransaction>, Vec<BankAccount>)> {
        let (transactions, accounts) = futures::join!(
            self.load_transactions(filter, force),
            self.load_accounts(force)
        );
        let transactions = transactions?;
        let accounts = accounts.unwrap_or_else(|e| {
            warn!("Bank account lookup failed, using cached names: {}", e);
            self.cached_accounts(false).ok().flatten().unwrap_or_default()
        });
        let filtered = filter_transactions(&transactions, &accounts, filter);
        Ok((filtered, accounts))
    }
}

#[async_trait]
impl BankServiceTrait for BankService {
    async fn list_transactions(&self, filter: &FilterState) -> Result<Vec<BankTransaction>> {
        let (transactions, _) = self.collect(filter, false).await?;
        Ok(transactions)
    }

    async fn bank_accounts(&self) -> Result<Vec<BankAccount>> {
        self.load_accounts(false).await
    }

    async fn summary(&self, filter: &FilterState) -> Result<BankSummaryReport> {
        let (transactions, accounts) = self.collect(filter, false).await?;
        Ok(summarize(&transactions, &accounts))
    }

    async fn refresh(&self, filter: &FilterState) -> Result<BankSummaryReport> {
        info!("Refreshing bank transactions and accounts");
        let (transactions, accounts) = self.collect(filter, true).await?;
        let report = summarize(&transactions, &accounts);
        info!(
            "Bank refresh complete: {} transactions across {} banks",
            report.total.transaction_count,
            report.banks.len()
        );
        Ok(report)
    }

    async fn update_status(
        &self,
        transaction_id: &str,
        status: ReconciliationStatus,
    ) -> Result<BankTransaction> {
        let prior = match self.store.begin_transition(transaction_id, status) {
            Ok(prior) => prior,
            Err(e) => {
                warn!("Status change {} -> {} refused: {}", transaction_id, status, e);
                return Err(e);
            }
        };

        if let Err(e) = self.repository.update_status(transaction_id, status).await {
            let rolled_back = self.store.restore_status(transaction_id, status, prior)?;
            warn!(
                "Backend rejected status {} for {} (rolled back: {}): {}",
                status, transaction_id, rolled_back, e
            );
            return Err(ReconciliationError::UpdateRejected {
                transaction_id: transaction_id.to_string(),
                message: e.to_string(),
            }
            .into());
        }

        info!("Transaction {} moved from {} to {}", transaction_id, prior, status);
        self.store
            .get(transaction_id)?
            .ok_or_else(|| Error::NotFound(format!("Bank transaction {}", transaction_id)))
    }

    fn cached_transactions(&self) -> Result<Vec<BankTransaction>> {
        self.store.snapshot()
    }
}

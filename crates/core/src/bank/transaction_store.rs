//! In-memory cache of the last fetched transaction list.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use super::bank_model::BankTransaction;
use super::reconciliation::ReconciliationStatus;
use crate::errors::{Error, Result};
use crate::filters::FilterState;

#[derive(Default)]
struct StoreInner {
    order: Vec<String>,
    by_id: HashMap<String, BankTransaction>,
    /// Server-side filter the rows were fetched with
    filter: Option<FilterState>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Holds the transactions currently on screen.
///
/// Status writes touch a single entry under a short write lock, so updates to
/// different transactions never interfere. Concurrent writes to the same id
/// are last-write-wins.
#[derive(Default)]
pub struct TransactionStore {
    inner: RwLock<StoreInner>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached list, keeping feed order, and records the filter
    /// it was fetched with.
    pub fn replace(&self, filter: &FilterState, transactions: Vec<BankTransaction>) -> Result<()> {
        let mut inner = self.write()?;
        inner.filter = Some(filter.clone());
        inner.order = transactions.iter().map(|t| t.id.clone()).collect();
        inner.by_id = transactions
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();
        inner.fetched_at = Some(Utc::now());
        Ok(())
    }

    pub fn get(&self, transaction_id: &str) -> Result<Option<BankTransaction>> {
        Ok(self.read()?.by_id.get(transaction_id).cloned())
    }

    pub fn status_of(&self, transaction_id: &str) -> Result<Option<ReconciliationStatus>> {
        Ok(self.read()?.by_id.get(transaction_id).map(|t| t.status))
    }

    /// Checks the lifecycle and applies `target` under one lock.
    ///
    /// Returns the status it replaced so a failed backend call can roll back.
    pub fn begin_transition(
        &self,
        transaction_id: &str,
        target: ReconciliationStatus,
    ) -> Result<ReconciliationStatus> {
        let mut inner = self.write()?;
        let transaction = inner
            .by_id
            .get_mut(transaction_id)
            .ok_or_else(|| Error::NotFound(format!("Bank transaction {}", transaction_id)))?;
        transaction.status.check_transition(transaction_id, target)?;
        Ok(std::mem::replace(&mut transaction.status, target))
    }

    /// Puts `prior` back only if the entry still holds `expected`.
    ///
    /// Returns false when another write has landed in the meantime.
    pub fn restore_status(
        &self,
        transaction_id: &str,
        expected: ReconciliationStatus,
        prior: ReconciliationStatus,
    ) -> Result<bool> {
        let mut inner = self.write()?;
        match inner.by_id.get_mut(transaction_id) {
            Some(transaction) if transaction.status == expected => {
                transaction.status = prior;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Cached transactions in feed order.
    pub fn snapshot(&self) -> Result<Vec<BankTransaction>> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect())
    }

    /// Cached rows if they were fetched with `filter` less than `ttl` ago.
    pub fn snapshot_if_fresh(
        &self,
        filter: &FilterState,
        ttl: Duration,
    ) -> Result<Option<Vec<BankTransaction>>> {
        let inner = self.read()?;
        let fresh = inner.filter.as_ref() == Some(filter)
            && inner
                .fetched_at
                .is_some_and(|at| Utc::now() - at < ttl);
        if !fresh {
            return Ok(None);
        }
        Ok(Some(
            inner
                .order
                .iter()
                .filter_map(|id| inner.by_id.get(id).cloned())
                .collect(),
        ))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|e| Error::Unexpected(format!("Transaction store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|e| Error::Unexpected(format!("Transaction store lock poisoned: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(id: &str, bank: &str) -> BankTransaction {
        BankTransaction {
            id: id.to_string(),
            bank_account_id: bank.to_string(),
            bank_name: None,
            amount: dec!(10),
            balance_after: dec!(0),
            counterparty_name: None,
            counterparty_iban: None,
            description: None,
            transaction_date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
            created_at: Utc::now(),
            status: ReconciliationStatus::Waiting,
            erp_account_code: None,
        }
    }

    fn bank_filter(bank: &str) -> FilterState {
        FilterState {
            bank_account_id: Some(bank.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_requires_matching_filter_and_freshness() {
        let store = TransactionStore::new();
        let ttl = Duration::minutes(5);
        assert_eq!(store.snapshot_if_fresh(&FilterState::default(), ttl).unwrap(), None);

        store.replace(&bank_filter("B1"), vec![tx("t1", "B1")]).unwrap();
        store.replace(&bank_filter("B2"), vec![tx("t2", "B2")]).unwrap();

        assert_eq!(store.snapshot_if_fresh(&bank_filter("B1"), ttl).unwrap(), None);
        let rows = store.snapshot_if_fresh(&bank_filter("B2"), ttl).unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "t2");
        assert_eq!(
            store.snapshot_if_fresh(&bank_filter("B2"), Duration::zero()).unwrap(),
            None
        );
    }

    #[test]
    fn test_concurrent_replaces_never_mislabel_rows() {
        let store = TransactionStore::new();
        let ttl = Duration::minutes(5);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    let bank = format!("B{}", worker);
                    let filter = bank_filter(&bank);
                    for round in 0..200 {
                        let rows = vec![
                            tx(&format!("{}-{}-a", bank, round), &bank),
                            tx(&format!("{}-{}-b", bank, round), &bank),
                        ];
                        store.replace(&filter, rows).unwrap();
                        if let Some(cached) = store.snapshot_if_fresh(&filter, ttl).unwrap() {
                            assert!(cached.iter().all(|t| t.bank_account_id == bank));
                        }
                    }
                });
            }
        });
    }
}

//! Per-bank cash-flow aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::bank_model::{BankAccount, BankTransaction};
use super::reconciliation::ReconciliationStatus;

/// Bank account id used for the grand-total bucket
pub const TOTAL_BANK_ID: &str = "TOTAL";

/// Inflow, outflow and net balance for one bank account (or the grand total).
///
/// `outflow` is a non-negative magnitude and `balance == inflow - outflow`
/// holds exactly: all three figures come from the same signed amounts with
/// no rounding in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub bank_account_id: String,
    pub name: String,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
}

impl BankSummary {
    pub fn empty(bank_account_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bank_account_id: bank_account_id.into(),
            name: name.into(),
            inflow: Decimal::ZERO,
            outflow: Decimal::ZERO,
            balance: Decimal::ZERO,
            transaction_count: 0,
        }
    }

    fn add(&mut self, amount: Decimal) {
        if amount > Decimal::ZERO {
            self.inflow += amount;
        } else {
            self.outflow += amount.abs();
        }
        self.balance += amount;
        self.transaction_count += 1;
    }
}

/// Number of transactions in each reconciliation status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub waiting: usize,
    pub success: usize,
    pub error: usize,
    pub manual: usize,
}

impl StatusCounts {
    fn add(&mut self, status: ReconciliationStatus) {
        match status {
            ReconciliationStatus::Waiting => self.waiting += 1,
            ReconciliationStatus::Success => self.success += 1,
            ReconciliationStatus::Error => self.error += 1,
            ReconciliationStatus::Manual => self.manual += 1,
        }
    }

    pub fn get(&self, status: ReconciliationStatus) -> usize {
        match status {
            ReconciliationStatus::Waiting => self.waiting,
            ReconciliationStatus::Success => self.success,
            ReconciliationStatus::Error => self.error,
            ReconciliationStatus::Manual => self.manual,
        }
    }
}

/// Per-bank summaries plus the grand total.
///
/// Always fully populated: an empty transaction list yields zero totals with
/// `has_data == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummaryReport {
    /// One entry per bank account, in first-seen order
    pub banks: Vec<BankSummary>,
    pub total: BankSummary,
    pub status_counts: StatusCounts,
    pub has_data: bool,
}

impl BankSummaryReport {
    pub fn bank(&self, bank_account_id: &str) -> Option<&BankSummary> {
        self.banks
            .iter()
            .find(|summary| summary.bank_account_id == bank_account_id)
    }
}

/// Folds `transactions` into per-bank and grand totals in a single pass.
///
/// Bank names come from `accounts`; unknown accounts fall back to the name
/// embedded in the transaction, then to the account id itself.
pub fn summarize(transactions: &[BankTransaction], accounts: &[BankAccount]) -> BankSummaryReport {
    let names: HashMap<&str, &str> = accounts
        .iter()
        .map(|account| (account.id.as_str(), account.name.as_str()))
        .collect();

    let mut banks: Vec<BankSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total = BankSummary::empty(TOTAL_BANK_ID, "Total");
    let mut status_counts = StatusCounts::default();

    for transaction in transactions {
        let bank_id = transaction.bank_account_id.as_str();
        let position = *index.entry(bank_id).or_insert_with(|| {
            let name = names
                .get(bank_id)
                .copied()
                .or(transaction.bank_name.as_deref())
                .unwrap_or(bank_id);
            banks.push(BankSummary::empty(bank_id, name));
            banks.len() - 1
        });

        banks[position].add(transaction.amount);
        total.add(transaction.amount);
        status_counts.add(transaction.status);
    }

    BankSummaryReport {
        has_data: !transactions.is_empty(),
        banks,
        total,
        status_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn tx(id: &str, bank: &str, amount: Decimal) -> BankTransaction {
        BankTransaction {
            id: id.to_string(),
            bank_account_id: bank.to_string(),
            bank_name: Some(format!("Feed {}", bank)),
            amount,
            balance_after: Decimal::ZERO,
            counterparty_name: None,
            counterparty_iban: None,
            description: None,
            transaction_date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(),
            status: ReconciliationStatus::Waiting,
            erp_account_code: None,
        }
    }

    fn account(id: &str, name: &str) -> BankAccount {
        BankAccount {
            id: id.to_string(),
            name: name.to_string(),
            company_id: "C1".to_string(),
            ledger_code: format!("102.{}", id),
        }
    }

    #[test]
    fn test_per_bank_and_grand_totals() {
        let transactions = vec![
            tx("t1", "B1", dec!(500)),
            tx("t2", "B1", dec!(-200)),
            tx("t3", "B2", dec!(300)),
        ];
        let report = summarize(&transactions, &[account("B1", "Ziraat TL")]);

        let b1 = report.bank("B1").unwrap();
        assert_eq!((b1.inflow, b1.outflow, b1.balance), (dec!(500), dec!(200), dec!(300)));
        assert_eq!(b1.name, "Ziraat TL");
        assert_eq!(b1.transaction_count, 2);

        let b2 = report.bank("B2").unwrap();
        assert_eq!((b2.inflow, b2.outflow, b2.balance), (dec!(300), dec!(0), dec!(300)));
        assert_eq!(b2.name, "Feed B2");

        assert_eq!(
            (report.total.inflow, report.total.outflow, report.total.balance),
            (dec!(800), dec!(200), dec!(600))
        );
        assert_eq!(report.total.bank_account_id, TOTAL_BANK_ID);
        assert!(report.has_data);

        for summary in report.banks.iter().chain(std::iter::once(&report.total)) {
            assert_eq!(summary.inflow - summary.outflow, summary.balance);
        }
    }

    #[test]
    fn test_empty_list_is_zero_report() {
        let report = summarize(&[], &[account("B1", "Ziraat TL")]);
        assert!(!report.has_data);
        assert!(report.banks.is_empty());
        assert_eq!(report.total.inflow, Decimal::ZERO);
        assert_eq!(report.total.outflow, Decimal::ZERO);
        assert_eq!(report.total.balance, Decimal::ZERO);
        assert_eq!(report.status_counts, StatusCounts::default());
    }

    #[test]
    fn test_name_falls_back_to_id() {
        let mut unnamed = tx("t1", "B9", dec!(-10.25));
        unnamed.bank_name = None;
        let report = summarize(&[unnamed], &[]);
        let b9 = report.bank("B9").unwrap();
        assert_eq!(b9.name, "B9");
        assert_eq!(b9.outflow, dec!(10.25));
        assert_eq!(b9.balance, dec!(-10.25));
    }

    #[test]
    fn test_status_counts() {
        let mut matched = tx("t1", "B1", dec!(1));
        matched.status = ReconciliationStatus::Success;
        let mut manual = tx("t2", "B1", dec!(2));
        manual.status = ReconciliationStatus::Manual;
        let report = summarize(&[matched, manual, tx("t3", "B1", dec!(3))], &[]);

        assert_eq!(report.status_counts.get(ReconciliationStatus::Success), 1);
        assert_eq!(report.status_counts.get(ReconciliationStatus::Manual), 1);
        assert_eq!(report.status_counts.get(ReconciliationStatus::Waiting), 1);
        assert_eq!(report.status_counts.get(ReconciliationStatus::Error), 0);
    }
}

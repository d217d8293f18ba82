//! Merged balance domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aging::AgingRecord;

/// Overdue components merged across companies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueDetail {
    /// Summed across companies
    pub not_yet_due: Decimal,
    /// Maximum across companies
    pub days_overdue: i32,
    /// Maximum across companies
    pub threshold_days: i32,
}

impl OverdueDetail {
    fn from_record(record: &AgingRecord) -> Self {
        Self {
            not_yet_due: Decimal::ZERO,
            days_overdue: record.days_overdue,
            threshold_days: record.threshold_days,
        }
    }

    fn absorb(&mut self, record: &AgingRecord) {
        self.not_yet_due += record.not_yet_due;
        self.days_overdue = self.days_overdue.max(record.days_overdue);
        self.threshold_days = self.threshold_days.max(record.threshold_days);
    }
}

/// One account's position across every company that reported it.
///
/// Derived data: rebuilt from scratch on every merge, never updated in place
/// by callers. `total_balance` always equals the sum of `company_balances`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedBalance {
    pub account_code: String,
    /// Display name: ERP account list, then the aging row itself, then the
    /// customer directory
    pub erp_name: Option<String>,
    pub customer_name: Option<String>,
    /// Company id -> that company's contribution (zero is kept)
    pub company_balances: BTreeMap<String, Decimal>,
    pub total_balance: Decimal,
    pub overdue_balance: Decimal,
    pub overdue: OverdueDetail,
}

impl MergedBalance {
    pub(crate) fn from_record(account_code: &str, company_id: &str, record: &AgingRecord) -> Self {
        let mut merged = Self {
            account_code: account_code.to_string(),
            erp_name: None,
            customer_name: None,
            company_balances: BTreeMap::new(),
            total_balance: Decimal::ZERO,
            overdue_balance: Decimal::ZERO,
            overdue: OverdueDetail::from_record(record),
        };
        merged.absorb(company_id, record);
        merged
    }

    pub(crate) fn absorb(&mut self, company_id: &str, record: &AgingRecord) {
        *self
            .company_balances
            .entry(company_id.to_string())
            .or_insert(Decimal::ZERO) += record.balance;
        self.total_balance += record.balance;
        self.overdue_balance += record.overdue_amount;
        self.overdue.absorb(record);
    }

    /// Contribution reported by `company_id`, zero included.
    pub fn company_balance(&self, company_id: &str) -> Option<Decimal> {
        self.company_balances.get(company_id).copied()
    }

    /// True when the company reported a non-zero balance for this account.
    pub fn has_contribution_from(&self, company_id: &str) -> bool {
        self.company_balance(company_id)
            .is_some_and(|balance| !balance.is_zero())
    }

    /// Per-company detail rows for display; zero contributions are omitted.
    pub fn company_breakdown(&self) -> Vec<(&str, Decimal)> {
        self.company_balances
            .iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(company_id, balance)| (company_id.as_str(), *balance))
            .collect()
    }

    pub fn is_overdue(&self) -> bool {
        self.overdue_balance > Decimal::ZERO
    }

    /// Best available name for display, falling back to the account code.
    pub fn display_name(&self) -> &str {
        self.erp_name
            .as_deref()
            .or(self.customer_name.as_deref())
            .unwrap_or(&self.account_code)
    }
}

/// Headline figures over a merged (possibly filtered) balance set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTotals {
    /// Sum of positive account totals
    pub total_receivable: Decimal,
    /// Magnitude of the sum of negative account totals
    pub total_payable: Decimal,
    /// `total_receivable - total_payable`
    pub net_balance: Decimal,
    pub total_overdue: Decimal,
    pub account_count: usize,
    pub overdue_account_count: usize,
}

impl BalanceTotals {
    pub fn from_balances(balances: &[MergedBalance]) -> Self {
        let mut totals = Self::default();
        for balance in balances {
            if balance.total_balance > Decimal::ZERO {
                totals.total_receivable += balance.total_balance;
            } else {
                totals.total_payable += balance.total_balance.abs();
            }
            totals.net_balance += balance.total_balance;
            totals.total_overdue += balance.overdue_balance;
            totals.account_count += 1;
            if balance.is_overdue() {
                totals.overdue_account_count += 1;
            }
        }
        totals
    }
}

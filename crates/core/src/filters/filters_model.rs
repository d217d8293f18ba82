//! Filter state models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bank::{ReconciliationStatus, TransactionKind};

/// Balance-sign selector for merged balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSign {
    #[default]
    All,
    /// `total_balance > 0`
    Positive,
    /// `total_balance < 0`
    Negative,
    /// `overdue_balance > 0`
    Overdue,
}

/// Transaction-type selector for bank transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTypeFilter {
    #[default]
    All,
    Inflow,
    Outflow,
}

impl TransactionTypeFilter {
    pub fn matches(self, kind: TransactionKind) -> bool {
        match self {
            TransactionTypeFilter::All => true,
            TransactionTypeFilter::Inflow => kind == TransactionKind::Inflow,
            TransactionTypeFilter::Outflow => kind == TransactionKind::Outflow,
        }
    }
}

/// Inclusive date range; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// User-selected filters for one screen.
///
/// Owned by whoever drives the screen and passed by reference; unset fields
/// impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Case-insensitive substring; blank means no text filter
    pub search: String,
    pub company_id: Option<String>,
    pub balance_sign: BalanceSign,
    pub bank_account_id: Option<String>,
    pub status: Option<ReconciliationStatus>,
    pub transaction_type: TransactionTypeFilter,
    pub date_range: DateRange,
}

impl FilterState {
    /// Normalized search needle, or `None` when the search box is blank.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(fold_case(trimmed))
        }
    }

    /// True when no field constrains anything.
    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }
}

/// Lowercases for matching. Dotted capital I is folded to a plain `i` so
/// Turkish names match without a combining mark.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            'İ' => 'i'.to_lowercase(),
            other => other.to_lowercase(),
        })
        .collect()
}

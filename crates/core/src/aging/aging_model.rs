//! Aging domain models.
//!
//! Field names on the wire follow the ERP query columns, which is why the
//! serde renames below differ from the Rust names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One account's aging row from a single company and fiscal year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingRecord {
    /// Join key across companies; rows without one are skipped by the merger
    #[serde(rename = "CariKodu", default)]
    pub account_code: Option<String>,
    #[serde(rename = "CariUnvan", default)]
    pub name: Option<String>,
    /// Positive = receivable owed to the company, negative = payable
    #[serde(rename = "CariBakiye", default)]
    pub balance: Decimal,
    #[serde(rename = "ToplamGecikme", default)]
    pub overdue_amount: Decimal,
    #[serde(rename = "VadesiGelmemis", default)]
    pub not_yet_due: Decimal,
    #[serde(rename = "GECIKMEGUN", default)]
    pub days_overdue: i32,
    #[serde(rename = "CariVade", default)]
    pub threshold_days: i32,
}

impl AgingRecord {
    /// Trimmed account code, or `None` when the row cannot be joined.
    pub fn join_key(&self) -> Option<&str> {
        self.account_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Trimmed display name, if the ERP supplied a non-blank one.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Account-list row from an ERP company: code and ledger name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountName {
    #[serde(rename = "ID")]
    pub code: String,
    pub name: String,
}

/// Customer-system row mapping an account code to the customer's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerName {
    pub account_code: String,
    pub name: String,
}

/// Aging rows reported by one company for the current pass.
///
/// An empty list is valid: the company's query may be disabled, still
/// loading, or may have failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAging {
    pub company_id: String,
    pub records: Vec<AgingRecord>,
}

impl CompanyAging {
    pub fn new(company_id: impl Into<String>, records: Vec<AgingRecord>) -> Self {
        Self {
            company_id: company_id.into(),
            records,
        }
    }
}

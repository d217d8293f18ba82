//! Manual refresh across every data source behind the dashboard.

use log::{info, warn};
use serde::Serialize;

use crate::balances::{ConsolidatedView, ConsolidationServiceTrait};
use crate::bank::{BankServiceTrait, BankSummaryReport};
use crate::filters::FilterState;

/// Outcome of a full refresh. Each side carries its own failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub balances: ConsolidatedView,
    pub bank: Option<BankSummaryReport>,
    pub bank_error: Option<String>,
    /// True if any ERP source or the bank feed failed
    pub has_error: bool,
}

/// Re-fetches ERP and bank data concurrently and resolves once all of it has
/// settled, successful or not.
pub async fn refresh_all(
    consolidation: &dyn ConsolidationServiceTrait,
    bank: &dyn BankServiceTrait,
    bank_filter: &FilterState,
) -> RefreshReport {
    let (balances, bank_result) =
        futures::join!(consolidation.refresh(), bank.refresh(bank_filter));

    let (bank, bank_error) = match bank_result {
        Ok(report) => (Some(report), None),
        Err(e) => {
            warn!("Bank refresh failed: {}", e);
            (None, Some(e.to_string()))
        }
    };
    let has_error = balances.has_error || bank_error.is_some();
    info!(
        "Refresh complete: {} accounts, {} source errors, bank ok: {}",
        balances.balances.len(),
        balances.errors.len(),
        bank_error.is_none()
    );

    RefreshReport {
        balances,
        bank,
        bank_error,
        has_error,
    }
}

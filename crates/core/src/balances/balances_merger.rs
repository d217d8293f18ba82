//! Cross-company balance merge.

use log::debug;
use std::collections::HashMap;

use super::balances_model::MergedBalance;
use crate::aging::CompanyAging;
use crate::names::NameDirectory;

/// Folds per-company aging rows into one [`MergedBalance`] per account code.
///
/// Pure and idempotent: callers re-run it whenever any company's rows change,
/// including with partial input while other companies are still loading.
/// Rows without an account code are skipped. The result is ordered by
/// descending absolute total balance; ties keep first-encounter order.
///
/// A company that lists the same account code twice contributes the sum of
/// both rows, so the per-company map always adds up to the total.
pub fn merge_balances(companies: &[CompanyAging], names: &NameDirectory) -> Vec<MergedBalance> {
    let mut merged: Vec<MergedBalance> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for company in companies {
        let mut skipped = 0usize;
        for record in &company.records {
            let Some(code) = record.join_key() else {
                skipped += 1;
                continue;
            };

            let position = match index.get(code) {
                Some(&position) => {
                    merged[position].absorb(&company.company_id, record);
                    position
                }
                None => {
                    index.insert(code.to_string(), merged.len());
                    merged.push(MergedBalance::from_record(code, &company.company_id, record));
                    merged.len() - 1
                }
            };

            let entry = &mut merged[position];
            if entry.erp_name.is_none() {
                entry.erp_name = names
                    .erp_name(code)
                    .or_else(|| record.display_name())
                    .or_else(|| names.customer_name(code))
                    .map(str::to_string);
            }
            if entry.customer_name.is_none() {
                entry.customer_name = names.customer_name(code).map(str::to_string);
            }
        }
        if skipped > 0 {
            debug!(
                "Skipped {} aging rows without account code from company {}",
                skipped, company.company_id
            );
        }
    }

    merged.sort_by(|a, b| b.total_balance.abs().cmp(&a.total_balance.abs()));
    merged
}

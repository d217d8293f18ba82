//! Pure filter functions. Every function keeps the input order.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::filters_model::{fold_case, BalanceSign, FilterState};
use crate::balances::MergedBalance;
use crate::bank::{BankAccount, BankTransaction};

fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| fold_case(text).contains(needle))
}

/// Tests one merged balance against the text, company and sign selectors.
pub fn balance_matches(balance: &MergedBalance, filter: &FilterState) -> bool {
    if let Some(needle) = filter.search_needle() {
        let hit = contains_folded(Some(balance.account_code.as_str()), &needle)
            || contains_folded(balance.erp_name.as_deref(), &needle)
            || contains_folded(balance.customer_name.as_deref(), &needle);
        if !hit {
            return false;
        }
    }

    if let Some(company_id) = filter.company_id.as_deref() {
        if !balance.has_contribution_from(company_id) {
            return false;
        }
    }

    match filter.balance_sign {
        BalanceSign::All => true,
        BalanceSign::Positive => balance.total_balance > Decimal::ZERO,
        BalanceSign::Negative => balance.total_balance < Decimal::ZERO,
        BalanceSign::Overdue => balance.overdue_balance > Decimal::ZERO,
    }
}

pub fn filter_balances(balances: &[MergedBalance], filter: &FilterState) -> Vec<MergedBalance> {
    balances
        .iter()
        .filter(|balance| balance_matches(balance, filter))
        .cloned()
        .collect()
}

/// Tests one transaction; `bank_name` is the resolved bank display name.
pub fn transaction_matches(
    transaction: &BankTransaction,
    bank_name: Option<&str>,
    filter: &FilterState,
) -> bool {
    if let Some(needle) = filter.search_needle() {
        let hit = contains_folded(transaction.counterparty_name.as_deref(), &needle)
            || contains_folded(transaction.description.as_deref(), &needle)
            || contains_folded(bank_name, &needle)
            || contains_folded(transaction.bank_name.as_deref(), &needle);
        if !hit {
            return false;
        }
    }

    if let Some(status) = filter.status {
        if transaction.status != status {
            return false;
        }
    }

    if let Some(bank_account_id) = filter.bank_account_id.as_deref() {
        if transaction.bank_account_id != bank_account_id {
            return false;
        }
    }

    filter.transaction_type.matches(transaction.kind())
        && filter.date_range.contains(transaction.transaction_date)
}

/// Applies `filter` to `transactions`, resolving bank names from `accounts`.
pub fn filter_transactions(
    transactions: &[BankTransaction],
    accounts: &[BankAccount],
    filter: &FilterState,
) -> Vec<BankTransaction> {
    let names: HashMap<&str, &str> = accounts
        .iter()
        .map(|account| (account.id.as_str(), account.name.as_str()))
        .collect();

    transactions
        .iter()
        .filter(|transaction| {
            let bank_name = names.get(transaction.bank_account_id.as_str()).copied();
            transaction_matches(transaction, bank_name, filter)
        })
        .cloned()
        .collect()
}

use log::debug;
use std::collections::HashMap;

use crate::aging::{AccountName, CustomerName};

/// Lookup maps from account code to display names.
///
/// ERP names follow first-company-wins: lists are folded in the order given
/// (registry order) and a later company never replaces an earlier name. This
/// is best-effort; spellings are not normalized across companies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDirectory {
    erp_names: HashMap<String, String>,
    customer_names: HashMap<String, String>,
}

impl NameDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds both maps from per-company account lists and the customer directory.
    pub fn build<'a, I>(account_lists: I, customers: &[CustomerName]) -> Self
    where
        I: IntoIterator<Item = &'a [AccountName]>,
    {
        let mut directory = Self::new();
        for list in account_lists {
            directory.add_account_names(list);
        }
        directory.add_customers(customers);
        debug!(
            "Name directory built: {} ERP names, {} customer names",
            directory.erp_names.len(),
            directory.customer_names.len()
        );
        directory
    }

    /// Adds one company's account list; existing codes keep their name.
    pub fn add_account_names(&mut self, names: &[AccountName]) {
        for account in names {
            if let Some((code, name)) = normalized(&account.code, &account.name) {
                self.erp_names.entry(code).or_insert(name);
            }
        }
    }

    pub fn add_customers(&mut self, customers: &[CustomerName]) {
        for customer in customers {
            if let Some((code, name)) = normalized(&customer.account_code, &customer.name) {
                self.customer_names.entry(code).or_insert(name);
            }
        }
    }

    pub fn erp_name(&self, account_code: &str) -> Option<&str> {
        self.erp_names.get(account_code).map(String::as_str)
    }

    pub fn customer_name(&self, account_code: &str) -> Option<&str> {
        self.customer_names.get(account_code).map(String::as_str)
    }
}

fn normalized(code: &str, name: &str) -> Option<(String, String)> {
    let code = code.trim();
    let name = name.trim();
    if code.is_empty() || name.is_empty() {
        return None;
    }
    Some((code.to_string(), name.to_string()))
}

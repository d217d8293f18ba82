//! Company domain models.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::MAX_COMPANIES;
use crate::errors::{Result, ValidationError};

/// One legally separate ERP company with its own ledger database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    /// Whether the company participates in consolidated reporting
    pub consolidated: bool,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>, consolidated: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            consolidated,
        }
    }
}

/// Ordered, validated list of companies.
///
/// Registry order is the order in which companies are queried and merged,
/// which makes first-seen name resolution deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRegistry {
    companies: Vec<Company>,
}

impl CompanyRegistry {
    pub fn new(companies: Vec<Company>) -> Result<Self> {
        if companies.len() > MAX_COMPANIES {
            return Err(ValidationError::InvalidInput(format!(
                "at most {} companies are supported, got {}",
                MAX_COMPANIES,
                companies.len()
            ))
            .into());
        }
        let mut seen = HashSet::new();
        for company in &companies {
            if company.id.trim().is_empty() {
                return Err(
                    ValidationError::InvalidInput("company id cannot be empty".to_string()).into(),
                );
            }
            if !seen.insert(company.id.as_str()) {
                return Err(ValidationError::DuplicateId(company.id.clone()).into());
            }
        }
        Ok(Self { companies })
    }

    /// Companies that take part in the merged view, in registry order.
    pub fn consolidated(&self) -> impl Iterator<Item = &Company> {
        self.companies.iter().filter(|c| c.consolidated)
    }

    pub fn get(&self, company_id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == company_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_keeps_order_and_filters_consolidated() {
        let registry = CompanyRegistry::new(vec![
            Company::new("C1", "Merkez", true),
            Company::new("C2", "Lojistik", false),
            Company::new("C3", "Ihracat", true),
        ])
        .unwrap();

        let ids: Vec<&str> = registry.consolidated().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
        assert_eq!(registry.get("C2").map(|c| c.name.as_str()), Some("Lojistik"));
        assert!(registry.get("C9").is_none());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let err = CompanyRegistry::new(vec![
            Company::new("C1", "Merkez", true),
            Company::new("C1", "Kopya", true),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("C1"));
    }

    #[test]
    fn test_registry_rejects_too_many_companies() {
        let companies = (1..=6)
            .map(|i| Company::new(format!("C{}", i), format!("Sirket {}", i), true))
            .collect();
        assert!(CompanyRegistry::new(companies).is_err());
    }
}

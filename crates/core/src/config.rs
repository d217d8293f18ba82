//! Engine configuration.
//!
//! Staleness budgets are advisory: the engine tolerates data of mixed
//! freshness, and the services only use these values to decide which sources
//! `load()` may skip.

use chrono::{Datelike, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BUSINESS_TZ_NAME;
use crate::errors::{Result, ValidationError};
use crate::filters::{PresetRange, QuickRange};
use crate::utils::time_utils::{business_now, DEFAULT_BUSINESS_TZ};
use crate::Error;

/// Staleness budgets and calendar settings for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Fiscal year passed to every ERP query
    pub fiscal_year: i32,

    /// Minutes an aging snapshot stays fresh (default: 15)
    pub aging_ttl_minutes: i64,

    /// Minutes an ERP account-name list stays fresh (default: 15)
    pub account_list_ttl_minutes: i64,

    /// Minutes the external customer directory stays fresh (default: 60)
    pub customer_directory_ttl_minutes: i64,

    /// Minutes bank-account reference data stays fresh (default: 120)
    pub bank_accounts_ttl_minutes: i64,

    /// Minutes a transaction list stays fresh (default: 5)
    pub transactions_ttl_minutes: i64,

    /// IANA timezone used for date presets (default: Europe/Istanbul)
    pub business_timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fiscal_year: business_now(DEFAULT_BUSINESS_TZ).year(),
            aging_ttl_minutes: 15,
            account_list_ttl_minutes: 15,
            customer_directory_ttl_minutes: 60,
            bank_accounts_ttl_minutes: 120,
            transactions_ttl_minutes: 5,
            business_timezone: DEFAULT_BUSINESS_TZ_NAME.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(2000..=2100).contains(&self.fiscal_year) {
            return Err(invalid(format!(
                "fiscalYear {} is out of range",
                self.fiscal_year
            )));
        }
        let ttls = [
            ("agingTtlMinutes", self.aging_ttl_minutes),
            ("accountListTtlMinutes", self.account_list_ttl_minutes),
            ("customerDirectoryTtlMinutes", self.customer_directory_ttl_minutes),
            ("bankAccountsTtlMinutes", self.bank_accounts_ttl_minutes),
            ("transactionsTtlMinutes", self.transactions_ttl_minutes),
        ];
        if let Some((key, value)) = ttls.iter().find(|(_, minutes)| *minutes <= 0) {
            return Err(invalid(format!("{} must be positive, got {}", key, value)));
        }
        self.timezone()?;
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.business_timezone
            .parse::<Tz>()
            .map_err(|_| invalid(format!("unknown timezone '{}'", self.business_timezone)))
    }

    /// Resolves `preset` against the current moment in the business timezone.
    pub fn resolve_preset(&self, preset: QuickRange) -> Result<PresetRange> {
        Ok(preset.resolve(self.timezone()?))
    }

    pub fn aging_ttl(&self) -> Duration {
        Duration::minutes(self.aging_ttl_minutes)
    }

    pub fn account_list_ttl(&self) -> Duration {
        Duration::minutes(self.account_list_ttl_minutes)
    }

    pub fn customer_directory_ttl(&self) -> Duration {
        Duration::minutes(self.customer_directory_ttl_minutes)
    }

    pub fn bank_accounts_ttl(&self) -> Duration {
        Duration::minutes(self.bank_accounts_ttl_minutes)
    }

    pub fn transactions_ttl(&self) -> Duration {
        Duration::minutes(self.transactions_ttl_minutes)
    }
}

fn invalid(message: String) -> Error {
    Error::Validation(ValidationError::InvalidConfigValue(message))
}

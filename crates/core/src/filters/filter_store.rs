//! Persistence of filter selections through a key-value store.

use async_trait::async_trait;
use log::warn;
use std::sync::Arc;

use super::filters_model::FilterState;
use crate::constants::{BALANCE_FILTER_STORAGE_KEY, BANK_FILTER_STORAGE_KEY};
use crate::errors::Result;

/// Minimal key-value storage the host platform provides.
#[async_trait]
pub trait KeyValueStoreTrait: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Loads and saves [`FilterState`] as JSON.
pub struct FilterStore {
    storage: Arc<dyn KeyValueStoreTrait>,
}

impl FilterStore {
    pub fn new(storage: Arc<dyn KeyValueStoreTrait>) -> Self {
        Self { storage }
    }

    /// Stored filter for `key`; missing or unreadable values give the default.
    pub fn load(&self, key: &str) -> FilterState {
        match self.storage.get(key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Discarding unreadable filter state under '{}': {}", key, e);
                FilterState::default()
            }),
            Ok(None) => FilterState::default(),
            Err(e) => {
                warn!("Failed to read filter state under '{}': {}", key, e);
                FilterState::default()
            }
        }
    }

    pub async fn save(&self, key: &str, filter: &FilterState) -> Result<()> {
        let json = serde_json::to_string(filter)?;
        self.storage.set(key, &json).await
    }

    /// Filter of the receivables screen.
    pub fn load_balances(&self) -> FilterState {
        self.load(BALANCE_FILTER_STORAGE_KEY)
    }

    pub async fn save_balances(&self, filter: &FilterState) -> Result<()> {
        self.save(BALANCE_FILTER_STORAGE_KEY, filter).await
    }

    /// Filter of the bank screen.
    pub fn load_bank(&self) -> FilterState {
        self.load(BANK_FILTER_STORAGE_KEY)
    }

    pub async fn save_bank(&self, filter: &FilterState) -> Result<()> {
        self.save(BANK_FILTER_STORAGE_KEY, filter).await
    }
}

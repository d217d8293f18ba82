//! Consolidation service: fans out per-company ERP queries and merges the results.

use async_trait::async_trait;
use chrono::Duration;
use futures::future::join_all;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::balances_merger::merge_balances;
use super::balances_model::{BalanceTotals, MergedBalance};
use super::balances_traits::ConsolidationServiceTrait;
use crate::aging::{
    AccountName, AgingRecord, AgingRepositoryTrait, CompanyAging, CustomerDirectoryTrait,
    CustomerName,
};
use crate::cache::CachedEntry;
use crate::companies::CompanyRegistry;
use crate::config::EngineConfig;
use crate::constants::CUSTOMER_DIRECTORY_SOURCE;
use crate::errors::{Result, SourceError};
use crate::filters::{filter_balances, FilterState};
use crate::names::NameDirectory;

/// Lifecycle of one independently fetched source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceState<T> {
    /// Requested, no data yet
    Loading,
    Ready(CachedEntry<T>),
    /// Last fetch failed; the source contributes nothing until it recovers
    Failed(SourceError),
}

impl<T> SourceState<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            SourceState::Ready(entry) => Some(&entry.value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SourceError> {
        match self {
            SourceState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SourceState::Loading)
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        match self {
            SourceState::Ready(entry) => entry.is_fresh(ttl),
            _ => false,
        }
    }

    fn settle(&mut self, source_id: String, result: Result<T>) -> Option<SourceError> {
        match result {
            Ok(value) => {
                *self = SourceState::Ready(CachedEntry::new(value));
                None
            }
            Err(e) => {
                let error = SourceError::new(source_id, e.to_string());
                warn!("{}", error);
                *self = SourceState::Failed(error.clone());
                Some(error)
            }
        }
    }

    fn mark_requested(&mut self) {
        if self.value().is_none() {
            *self = SourceState::Loading;
        }
    }
}

/// Every source's current state for one fiscal year.
struct Sources {
    fiscal_year: i32,
    aging: HashMap<String, SourceState<Vec<AgingRecord>>>,
    account_names: HashMap<String, SourceState<Vec<AccountName>>>,
    customers: SourceState<Vec<CustomerName>>,
}

impl Sources {
    fn new(fiscal_year: i32) -> Self {
        Self {
            fiscal_year,
            aging: HashMap::new(),
            account_names: HashMap::new(),
            customers: SourceState::Loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceJob {
    Aging(String),
    AccountNames(String),
    Customers,
}

fn needs_fetch<T>(state: Option<&SourceState<T>>, ttl: Duration, force: bool) -> bool {
    force || !state.is_some_and(|s| s.is_fresh(ttl))
}

fn aging_source_id(company_id: &str) -> String {
    format!("aging:{}", company_id)
}

fn account_names_source_id(company_id: &str) -> String {
    format!("accounts:{}", company_id)
}

/// Merged receivables plus the health of every source behind them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedView {
    pub fiscal_year: i32,
    pub balances: Vec<MergedBalance>,
    pub totals: BalanceTotals,
    /// One entry per failed source, in registry order
    pub errors: Vec<SourceError>,
    /// True if any source failed; partial data is still present
    pub has_error: bool,
    /// True while any source has been requested but not answered
    pub is_loading: bool,
}

/// Service producing the consolidated cross-company receivables view.
pub struct ConsolidationService {
    registry: CompanyRegistry,
    aging_repository: Arc<dyn AgingRepositoryTrait>,
    customer_directory: Arc<dyn CustomerDirectoryTrait>,
    config: RwLock<EngineConfig>,
    sources: RwLock<Sources>,
}

impl ConsolidationService {
    pub fn new(
        registry: CompanyRegistry,
        aging_repository: Arc<dyn AgingRepositoryTrait>,
        customer_directory: Arc<dyn CustomerDirectoryTrait>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            aging_repository,
            customer_directory,
            sources: RwLock::new(Sources::new(config.fiscal_year)),
            config: RwLock::new(config),
        }
    }

    pub fn registry(&self) -> &CompanyRegistry {
        &self.registry
    }

    /// Current state of one company's aging source.
    pub async fn aging_state(&self, company_id: &str) -> Option<SourceState<Vec<AgingRecord>>> {
        self.sources.read().await.aging.get(company_id).cloned()
    }

    fn plan(&self, sources: &Sources, config: &EngineConfig, force: bool) -> Vec<SourceJob> {
        let mut jobs = Vec::new();
        for company in self.registry.consolidated() {
            if needs_fetch(sources.aging.get(&company.id), config.aging_ttl(), force) {
                jobs.push(SourceJob::Aging(company.id.clone()));
            }
            if needs_fetch(
                sources.account_names.get(&company.id),
                config.account_list_ttl(),
                force,
            ) {
                jobs.push(SourceJob::AccountNames(company.id.clone()));
            }
        }
        if needs_fetch(
            Some(&sources.customers),
            config.customer_directory_ttl(),
            force,
        ) {
            jobs.push(SourceJob::Customers);
        }
        jobs
    }

    fn mark_requested(sources: &mut Sources, job: &SourceJob) {
        match job {
            SourceJob::Aging(company_id) => sources
                .aging
                .entry(company_id.clone())
                .or_insert(SourceState::Loading)
                .mark_requested(),
            SourceJob::AccountNames(company_id) => sources
                .account_names
                .entry(company_id.clone())
                .or_insert(SourceState::Loading)
                .mark_requested(),
            SourceJob::Customers => sources.customers.mark_requested(),
        }
    }

    /// Runs one fetch and records its outcome as soon as it completes.
    async fn run_job(&self, fiscal_year: i32, job: SourceJob) -> Option<SourceError> {
        match job {
            SourceJob::Aging(company_id) => {
                let result = self
                    .aging_repository
                    .fetch_aging(fiscal_year, &company_id)
                    .await;
                if let Ok(records) = &result {
                    debug!("Company {} returned {} aging rows", company_id, records.len());
                }
                let mut sources = self.sources.write().await;
                if sources.fiscal_year != fiscal_year {
                    return None;
                }
                sources
                    .aging
                    .entry(company_id.clone())
                    .or_insert(SourceState::Loading)
                    .settle(aging_source_id(&company_id), result)
            }
            SourceJob::AccountNames(company_id) => {
                let result = self
                    .aging_repository
                    .fetch_account_names(fiscal_year, &company_id)
                    .await;
                let mut sources = self.sources.write().await;
                if sources.fiscal_year != fiscal_year {
                    return None;
                }
                sources
                    .account_names
                    .entry(company_id.clone())
                    .or_insert(SourceState::Loading)
                    .settle(account_names_source_id(&company_id), result)
            }
            SourceJob::Customers => {
                let result = self.customer_directory.fetch_customers().await;
                let mut sources = self.sources.write().await;
                if sources.fiscal_year != fiscal_year {
                    return None;
                }
                sources
                    .customers
                    .settle(CUSTOMER_DIRECTORY_SOURCE.to_string(), result)
            }
        }
    }

    async fn fetch(&self, force: bool) -> ConsolidatedView {
        let config = self.config.read().await.clone();
        let jobs = {
            let mut sources = self.sources.write().await;
            let jobs = self.plan(&sources, &config, force);
            for job in &jobs {
                Self::mark_requested(&mut sources, job);
            }
            jobs
        };

        if !jobs.is_empty() {
            info!(
                "Fetching {} sources for fiscal year {}",
                jobs.len(),
                config.fiscal_year
            );
            let fetches = jobs
                .into_iter()
                .map(|job| self.run_job(config.fiscal_year, job));
            let failures = join_all(fetches).await.into_iter().flatten().count();
            info!("Source fetch finished with {} failures", failures);
        }

        self.view().await
    }

    fn build_view(&self, sources: &Sources) -> ConsolidatedView {
        let mut errors = Vec::new();
        let mut is_loading = false;
        let mut companies = Vec::new();
        let mut account_lists: Vec<&[AccountName]> = Vec::new();

        for company in self.registry.consolidated() {
            let aging = sources.aging.get(&company.id);
            let names = sources.account_names.get(&company.id);
            is_loading |= aging.map_or(true, SourceState::is_loading);
            is_loading |= names.map_or(true, SourceState::is_loading);
            errors.extend(aging.and_then(SourceState::error).cloned());
            errors.extend(names.and_then(SourceState::error).cloned());

            let records = aging
                .and_then(SourceState::value)
                .cloned()
                .unwrap_or_default();
            companies.push(CompanyAging::new(company.id.clone(), records));
            if let Some(list) = names.and_then(SourceState::value) {
                account_lists.push(list.as_slice());
            }
        }
        is_loading |= sources.customers.is_loading();
        errors.extend(sources.customers.error().cloned());

        let customers = sources
            .customers
            .value()
            .map(Vec::as_slice)
            .unwrap_or_default();
        let names = NameDirectory::build(account_lists, customers);
        let balances = merge_balances(&companies, &names);

        ConsolidatedView {
            fiscal_year: sources.fiscal_year,
            totals: BalanceTotals::from_balances(&balances),
            balances,
            has_error: !errors.is_empty(),
            errors,
            is_loading,
        }
    }
}

#[async_trait]
impl ConsolidationServiceTrait for ConsolidationService {
    async fn load(&self) -> ConsolidatedView {
        self.fetch(false).await
    }

    async fn refresh(&self) -> ConsolidatedView {
        info!("Manual refresh of all consolidated sources");
        self.fetch(true).await
    }

    async fn view(&self) -> ConsolidatedView {
        let sources = self.sources.read().await;
        self.build_view(&sources)
    }

    async fn filtered_view(&self, filter: &FilterState) -> ConsolidatedView {
        let mut view = self.view().await;
        view.balances = filter_balances(&view.balances, filter);
        view.totals = BalanceTotals::from_balances(&view.balances);
        view
    }

    async fn set_fiscal_year(&self, fiscal_year: i32) -> Result<()> {
        let mut config = self.config.write().await;
        let mut candidate = config.clone();
        candidate.fiscal_year = fiscal_year;
        candidate.validate()?;
        *config = candidate;
        *self.sources.write().await = Sources::new(fiscal_year);
        info!("Fiscal year set to {}, cached sources cleared", fiscal_year);
        Ok(())
    }
}

//! Consolidation service traits.

use async_trait::async_trait;

use super::balances_service::ConsolidatedView;
use crate::errors::Result;
use crate::filters::FilterState;

/// Trait defining the contract for the consolidated receivables view.
///
/// Fetch failures never surface as `Err` here: they are reported per source
/// inside [`ConsolidatedView`] next to whatever data did arrive.
#[async_trait]
pub trait ConsolidationServiceTrait: Send + Sync {
    /// Fetches only missing, failed or stale sources, then returns the view.
    async fn load(&self) -> ConsolidatedView;

    /// Re-fetches every source concurrently and waits for all of them.
    async fn refresh(&self) -> ConsolidatedView;

    /// Merges whatever data is currently held, without fetching.
    async fn view(&self) -> ConsolidatedView;

    /// [`view`](Self::view) narrowed by `filter`; totals cover the filtered set.
    async fn filtered_view(&self, filter: &FilterState) -> ConsolidatedView;

    /// Switches fiscal year and drops every cached source.
    async fn set_fiscal_year(&self, fiscal_year: i32) -> Result<()>;
}

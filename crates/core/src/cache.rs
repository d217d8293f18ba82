//! Staleness-aware cache entries.
//!
//! Each source keeps its own fetch timestamp so callers can combine data of
//! mixed freshness; the engine never blocks on staleness.

use chrono::{DateTime, Duration, Utc};

/// A cached value plus the instant it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntry<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CachedEntry<T> {
    pub fn new(value: T) -> Self {
        Self::with_timestamp(value, Utc::now())
    }

    pub fn with_timestamp(value: T, fetched_at: DateTime<Utc>) -> Self {
        Self { value, fetched_at }
    }

    /// True while `now` is still within `ttl` of the fetch.
    pub fn is_fresh_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < ttl
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.is_fresh_at(ttl, Utc::now())
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }
}

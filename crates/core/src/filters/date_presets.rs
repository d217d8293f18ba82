//! Quick date-range presets.
//!
//! Presets are resolved against the moment of evaluation and never cached.
//! Weeks run Monday to Sunday; months are calendar months.

use chrono::{Duration, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filters_model::DateRange;
use crate::utils::time_utils::{
    business_now, end_of_day, month_end, month_start, start_of_day, week_start,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickRange {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

/// A resolved preset: `start` at 00:00:00, `end` at 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PresetRange {
    /// Date-only range for filtering on business dates.
    pub fn to_date_range(self) -> DateRange {
        DateRange::new(Some(self.start.date()), Some(self.end.date()))
    }
}

impl QuickRange {
    pub const ALL: [QuickRange; 6] = [
        QuickRange::Today,
        QuickRange::Yesterday,
        QuickRange::ThisWeek,
        QuickRange::LastWeek,
        QuickRange::ThisMonth,
        QuickRange::LastMonth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuickRange::Today => "today",
            QuickRange::Yesterday => "yesterday",
            QuickRange::ThisWeek => "thisWeek",
            QuickRange::LastWeek => "lastWeek",
            QuickRange::ThisMonth => "thisMonth",
            QuickRange::LastMonth => "lastMonth",
        }
    }

    /// Resolves the preset relative to `now`.
    pub fn resolve_at(self, now: NaiveDateTime) -> PresetRange {
        let today = now.date();
        let (first, last) = match self {
            QuickRange::Today => (today, today),
            QuickRange::Yesterday => {
                let yesterday = today - Duration::days(1);
                (yesterday, yesterday)
            }
            QuickRange::ThisWeek => {
                let monday = week_start(today);
                (monday, monday + Duration::days(6))
            }
            QuickRange::LastWeek => {
                let monday = week_start(today) - Duration::days(7);
                (monday, monday + Duration::days(6))
            }
            QuickRange::ThisMonth => (month_start(today), month_end(today)),
            QuickRange::LastMonth => {
                let last_of_previous = month_start(today) - Duration::days(1);
                (month_start(last_of_previous), last_of_previous)
            }
        };
        PresetRange {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// Resolves the preset against the current time in `tz`.
    pub fn resolve(self, tz: Tz) -> PresetRange {
        self.resolve_at(business_now(tz))
    }
}

impl fmt::Display for QuickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown date preset: {}", s))
    }
}

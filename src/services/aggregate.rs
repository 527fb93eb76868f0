// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user footprint aggregation.
//!
//! Rebuilt from the full activity history on every request; nothing here
//! is cached or updated incrementally.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

use crate::models::{Activity, Aggregate, CategoryBreakdown, TrendPoint};
use crate::time_utils::{trailing_days, utc_day};

/// Number of calendar days in the trend series.
pub const TREND_DAYS: u32 = 7;

/// Activity count, clamped to `u32::MAX`.
fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Build totals, category breakdown and the trailing 7-day trend.
///
/// Trend days are UTC calendar days ending at `as_of`. Activities outside
/// the window still count toward the totals. Activities whose stored
/// category is not recognised count toward the totals but not toward
/// `by_category`.
pub fn aggregate(activities: &[Activity], as_of: DateTime<Utc>) -> Aggregate {
    let mut total_footprint = 0.0;
    let mut by_category = CategoryBreakdown::default();
    let mut buckets: BTreeMap<NaiveDate, f64> = trailing_days(as_of, TREND_DAYS)
        .into_iter()
        .map(|day| (day, 0.0))
        .collect();

    for activity in activities {
        total_footprint += activity.carbon_footprint;

        if let Some(category) = activity.category() {
            by_category.add(category, activity.carbon_footprint);
        }

        if let Some(bucket) = buckets.get_mut(&utc_day(activity.date)) {
            *bucket += activity.carbon_footprint;
        }
    }

    let trends = buckets
        .into_iter()
        .map(|(date, footprint)| TrendPoint { date, footprint })
        .collect();

    Aggregate {
        total_footprint,
        activity_count: saturating_count(activities.len()),
        by_category,
        trends,
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived dashboard views. None of these are persisted.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Category;

/// Footprint per category (kg CO2e).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategoryBreakdown {
    pub transport: f64,
    pub electricity: f64,
    pub food: f64,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Electricity => self.electricity,
            Category::Food => self.food,
        }
    }

    pub fn add(&mut self, category: Category, footprint: f64) {
        match category {
            Category::Transport => self.transport += footprint,
            Category::Electricity => self.electricity += footprint,
            Category::Food => self.food += footprint,
        }
    }
}

/// One day of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrendPoint {
    /// UTC calendar day, serialized as `YYYY-MM-DD`
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub footprint: f64,
}

/// Totals computed from a user's activity history.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub total_footprint: f64,
    pub activity_count: u32,
    pub by_category: CategoryBreakdown,
    /// Oldest day first
    pub trends: Vec<TrendPoint>,
}

/// Unlocked badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
}

/// Full dashboard response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Summary {
    pub total_footprint: f64,
    pub activity_count: u32,
    pub by_category: CategoryBreakdown,
    pub trends: Vec<TrendPoint>,
    pub suggestions: Vec<&'static str>,
    pub achievements: Vec<Achievement>,
}

/// Leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    pub username: String,
    pub total_footprint: f64,
}

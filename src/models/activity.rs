// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged activity model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of activity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Transport,
    Electricity,
    Food,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Transport, Category::Electricity, Category::Food];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Electricity => "electricity",
            Category::Food => "food",
        }
    }

    /// Parse a stored or submitted category name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored activity record.
///
/// `data` is kept exactly as the client submitted it; the typed view is
/// [`ActivityData`], parsed on demand by the footprint calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Opaque identifier (also used as document ID)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Category name. Read back as a string so records written under an
    /// older category set still load.
    pub activity_type: String,
    /// Raw category-specific inputs
    pub data: Map<String, Value>,
    /// kg CO2e, computed once at creation
    pub carbon_footprint: f64,
    /// When the activity happened
    pub date: DateTime<Utc>,
}

impl Activity {
    pub fn category(&self) -> Option<Category> {
        Category::parse(&self.activity_type)
    }
}

/// Typed activity payload, one variant per category.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityData {
    /// `distance` in km
    Transport { mode: String, distance: f64 },
    /// `usage` in kWh
    Electricity { usage: f64 },
    /// `servings` of a meal of `meal_type`
    Food { meal_type: String, servings: f64 },
}

impl ActivityData {
    pub fn category(&self) -> Category {
        match self {
            ActivityData::Transport { .. } => Category::Transport,
            ActivityData::Electricity { .. } => Category::Electricity,
            ActivityData::Food { .. } => Category::Food,
        }
    }
}

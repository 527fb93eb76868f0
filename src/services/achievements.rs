// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badges derived from current totals.
//!
//! Nothing is stored: a badge is shown only while its condition holds.

use crate::models::Achievement;

pub const FIRST_STEP: Achievement = Achievement {
    title: "First Step",
    description: "Logged your first activity!",
};

pub const ECO_ENTHUSIAST: Achievement = Achievement {
    title: "Eco-Enthusiast",
    description: "Logged 10 activities.",
};

pub const LOW_FOOTPRINT: Achievement = Achievement {
    title: "Low Footprint",
    description: "Kept your total footprint under 50kg CO2e.",
};

const ENTHUSIAST_MIN_ACTIVITIES: u32 = 10;
const LOW_FOOTPRINT_LIMIT: f64 = 50.0;

/// Unlocked badges in catalogue order.
pub fn evaluate(activity_count: u32, total_footprint: f64) -> Vec<Achievement> {
    let mut unlocked = Vec::new();

    if activity_count >= 1 {
        unlocked.push(FIRST_STEP);
    }
    if activity_count >= ENTHUSIAST_MIN_ACTIVITIES {
        unlocked.push(ECO_ENTHUSIAST);
    }
    if total_footprint > 0.0 && total_footprint < LOW_FOOTPRINT_LIMIT {
        unlocked.push(LOW_FOOTPRINT);
    }

    unlocked
}

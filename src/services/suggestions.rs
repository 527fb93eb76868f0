// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Heuristic tips derived from a user's category breakdown.

use crate::models::{Aggregate, Category};

/// Share of the total above which a category gets its own tip.
pub const HIGH_SHARE_THRESHOLD: f64 = 0.4;

pub const TIP_HIGH_TRANSPORT: &str = "Your transport footprint is high. Consider carpooling, using public transport, or cycling for shorter trips.";
pub const TIP_HIGH_ELECTRICITY: &str = "To reduce your electricity footprint, try using energy-efficient appliances, switching to LED bulbs, and unplugging devices when not in use.";
pub const TIP_HIGH_FOOD: &str = "A significant portion of your footprint comes from food. Incorporating more plant-based meals can make a big difference.";
pub const TIP_GENERAL_GOOD: &str = "You're doing great! Keep up the good work. Look for new ways to be eco-friendly, like reducing waste or supporting sustainable brands.";
pub const TIP_DEFAULT: &str =
    "Log more activities to get personalized suggestions on how to reduce your carbon footprint.";

fn high_usage_tip(category: Category) -> &'static str {
    match category {
        Category::Transport => TIP_HIGH_TRANSPORT,
        Category::Electricity => TIP_HIGH_ELECTRICITY,
        Category::Food => TIP_HIGH_FOOD,
    }
}

/// Tips for a summary, in a fixed order with no duplicates.
pub fn suggest(aggregate: &Aggregate) -> Vec<&'static str> {
    if aggregate.total_footprint == 0.0 {
        return vec![TIP_DEFAULT];
    }

    let mut tips: Vec<&'static str> = Vec::new();
    for category in Category::ALL {
        let share = aggregate.by_category.get(category) / aggregate.total_footprint;
        let tip = high_usage_tip(category);
        if share > HIGH_SHARE_THRESHOLD && !tips.contains(&tip) {
            tips.push(tip);
        }
    }

    if tips.is_empty() {
        tips.push(TIP_GENERAL_GOOD);
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryBreakdown;

    fn make_aggregate(transport: f64, electricity: f64, food: f64, total: f64) -> Aggregate {
        Aggregate {
            total_footprint: total,
            activity_count: 1,
            by_category: CategoryBreakdown {
                transport,
                electricity,
                food,
            },
            trends: vec![],
        }
    }

    #[test]
    fn test_zero_total_gives_default_only() {
        let tips = suggest(&make_aggregate(0.0, 0.0, 0.0, 0.0));
        assert_eq!(tips, vec![TIP_DEFAULT]);
    }

    #[test]
    fn test_dominant_transport() {
        let tips = suggest(&make_aggregate(45.0, 5.0, 5.0, 55.0));
        assert_eq!(tips, vec![TIP_HIGH_TRANSPORT]);
    }

    #[test]
    fn test_two_categories_over_threshold_keep_order() {
        let tips = suggest(&make_aggregate(5.0, 45.0, 50.0, 100.0));
        assert_eq!(tips, vec![TIP_HIGH_ELECTRICITY, TIP_HIGH_FOOD]);
    }

    #[test]
    fn test_balanced_gives_general_tip() {
        // 0.4 exactly is not over the threshold
        let tips = suggest(&make_aggregate(40.0, 30.0, 30.0, 100.0));
        assert_eq!(tips, vec![TIP_GENERAL_GOOD]);
    }

    #[test]
    fn test_unrecognised_category_dilutes_shares() {
        // Footprint from an unknown stored category is in the total only
        let tips = suggest(&make_aggregate(10.0, 10.0, 10.0, 100.0));
        assert_eq!(tips, vec![TIP_GENERAL_GOOD]);
    }
}

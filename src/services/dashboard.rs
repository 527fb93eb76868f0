// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard assembly: aggregate, then derive tips and badges.

use chrono::{DateTime, Utc};

use crate::models::{Activity, Summary};
use crate::services::{achievements, aggregate, suggestions};

/// Build the full dashboard summary for one user's activities.
pub fn build_summary(activities: &[Activity], as_of: DateTime<Utc>) -> Summary {
    let aggregate = aggregate::aggregate(activities, as_of);
    let suggestions = suggestions::suggest(&aggregate);
    let achievements =
        achievements::evaluate(aggregate.activity_count, aggregate.total_footprint);

    Summary {
        total_footprint: aggregate.total_footprint,
        activity_count: aggregate.activity_count,
        by_category: aggregate.by_category,
        trends: aggregate.trends,
        suggestions,
        achievements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::achievements::{FIRST_STEP, LOW_FOOTPRINT};
    use crate::services::suggestions::{TIP_DEFAULT, TIP_HIGH_TRANSPORT};
    use chrono::TimeZone;

    #[test]
    fn test_empty_summary() {
        let as_of = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summary = build_summary(&[], as_of);

        assert_eq!(summary.activity_count, 0);
        assert_eq!(summary.total_footprint, 0.0);
        assert_eq!(summary.trends.len(), 7);
        assert_eq!(summary.suggestions, vec![TIP_DEFAULT]);
        assert!(summary.achievements.is_empty());
    }

    #[test]
    fn test_summary_json_shape() {
        let as_of = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let activity = Activity {
            id: "1".to_string(),
            user_id: "u".to_string(),
            activity_type: "transport".to_string(),
            data: serde_json::Map::new(),
            carbon_footprint: 21.0,
            date: as_of,
        };

        let summary = build_summary(&[activity], as_of);
        assert_eq!(summary.suggestions, vec![TIP_HIGH_TRANSPORT]);
        assert_eq!(summary.achievements, vec![FIRST_STEP, LOW_FOOTPRINT]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalFootprint"], 21.0);
        assert_eq!(json["activityCount"], 1);
        assert_eq!(json["byCategory"]["transport"], 21.0);
        assert_eq!(json["trends"][6]["date"], "2024-01-15");
        assert_eq!(json["trends"][6]["footprint"], 21.0);
        assert_eq!(json["achievements"][0]["title"], "First Step");
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cross-user ranking. Lowest total footprint ranks first.

use std::collections::HashMap;

use crate::models::{Activity, LeaderboardEntry};
use crate::services::footprint::round2;

/// Maximum number of ranked users returned.
pub const LEADERBOARD_SIZE: usize = 10;

/// Sum footprints per user.
pub fn totals_by_user(activities: &[Activity]) -> HashMap<&str, f64> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for activity in activities {
        *totals.entry(activity.user_id.as_str()).or_insert(0.0) += activity.carbon_footprint;
    }
    totals
}

/// Rank users by ascending total footprint.
///
/// Users missing from `usernames` are dropped before the cut. Ties are
/// ordered by username.
pub fn rank(activities: &[Activity], usernames: &HashMap<String, String>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<(String, f64)> = totals_by_user(activities)
        .into_iter()
        .filter_map(|(user_id, total)| {
            usernames
                .get(user_id)
                .map(|username| (username.clone(), total))
        })
        .collect();

    entries.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(LEADERBOARD_SIZE);

    entries
        .into_iter()
        .map(|(username, total)| LeaderboardEntry {
            username,
            total_footprint: round2(total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(user_id: &str, footprint: f64) -> Activity {
        Activity {
            id: format!("{user_id}-{footprint}"),
            user_id: user_id.to_string(),
            activity_type: "transport".to_string(),
            data: serde_json::Map::new(),
            carbon_footprint: footprint,
            date: "2024-01-15T10:00:00Z".parse().unwrap(),
        }
    }

    fn names(ids: &[&str]) -> HashMap<String, String> {
        ids.iter()
            .map(|id| (id.to_string(), format!("user_{id}")))
            .collect()
    }

    #[test]
    fn test_ascending_order() {
        let activities = vec![
            make_activity("a", 3.0),
            make_activity("a", 2.0),
            make_activity("b", 2.0),
            make_activity("c", 8.0),
        ];

        let ranked = rank(&activities, &names(&["a", "b", "c"]));

        let order: Vec<&str> = ranked.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(order, vec!["user_b", "user_a", "user_c"]);
        assert_eq!(ranked[1].total_footprint, 5.0);
    }

    #[test]
    fn test_limited_to_ten() {
        let ids: Vec<String> = (0..15).map(|i| format!("u{i:02}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let activities: Vec<Activity> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| make_activity(id, i as f64))
            .collect();

        let ranked = rank(&activities, &names(&id_refs));

        assert_eq!(ranked.len(), LEADERBOARD_SIZE);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].total_footprint <= w[1].total_footprint));
        assert_eq!(ranked[0].username, "user_u00");
    }

    #[test]
    fn test_ties_broken_by_username() {
        let activities = vec![make_activity("z", 4.0), make_activity("m", 4.0)];

        let ranked = rank(&activities, &names(&["z", "m"]));

        assert_eq!(ranked[0].username, "user_m");
        assert_eq!(ranked[1].username, "user_z");
    }

    #[test]
    fn test_users_without_profile_are_dropped() {
        let activities = vec![make_activity("ghost", 0.5), make_activity("a", 1.0)];

        let ranked = rank(&activities, &names(&["a"]));

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].username, "user_a");
    }

    #[test]
    fn test_totals_are_rounded() {
        let activities = vec![make_activity("a", 0.1), make_activity("a", 0.2)];

        let ranked = rank(&activities, &names(&["a"]));

        assert_eq!(ranked[0].total_footprint, 0.3);
    }

    #[test]
    fn test_empty() {
        assert!(rank(&[], &names(&["a"])).is_empty());
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and the injectable clock.

use chrono::{DateTime, NaiveDate, Utc};

/// Calendar day of a timestamp. Trend buckets are always keyed in UTC.
pub fn utc_day(date: DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

/// The `count` UTC calendar days ending at `as_of`, oldest first.
pub fn trailing_days(as_of: DateTime<Utc>, count: u32) -> Vec<NaiveDate> {
    let end = utc_day(as_of);
    (0..count)
        .rev()
        .filter_map(|offset| end.checked_sub_days(chrono::Days::new(u64::from(offset))))
        .collect()
}

/// Source of "now" for activity dates and the trend window.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant (tests, replays).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_trailing_days_oldest_first() {
        let as_of = Utc.with_ymd_and_hms(2024, 3, 2, 23, 59, 0).unwrap();
        let days = trailing_days(as_of, 7);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_utc_day_ignores_offset_of_input() {
        let late = DateTime::parse_from_rfc3339("2024-01-15T23:30:00-05:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(utc_day(late), NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }
}

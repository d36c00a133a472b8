//! Temporal expansion of event intervals into discrete buckets

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use std::collections::BTreeSet;

use cadence_core::event::CanonicalEvent;

/// Hour-of-day values (0-23) a `[start, end)` interval touches.
///
/// Partial hours at both ends count, as does every hour in between, across
/// day boundaries: 23:30-01:30 occupies {23, 0, 1}. A zero-duration event
/// occupies exactly the hour containing the instant. Recomputed per call,
/// never cached on the event.
pub fn hour_buckets(start: DateTime<Utc>, end: DateTime<Utc>) -> BTreeSet<u32> {
    let mut hours = BTreeSet::new();

    if end <= start {
        hours.insert(start.hour());
        return hours;
    }

    let mut cursor = start
        .date_naive()
        .and_hms_opt(start.hour(), 0, 0)
        .unwrap()
        .and_utc();

    while cursor < end {
        hours.insert(cursor.hour());
        if hours.len() == 24 {
            break;
        }
        cursor += chrono::Duration::hours(1);
    }

    hours
}

/// Calendar date an event is attributed to (its start date, UTC).
pub fn event_date(event: &CanonicalEvent) -> NaiveDate {
    event.start.date_naive()
}

/// Day of week an event is attributed to (its start date, UTC).
pub fn event_weekday(event: &CanonicalEvent) -> Weekday {
    event.start.weekday()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_within_single_hour() {
        let hours = hour_buckets(at(1, 9, 15), at(1, 9, 45));
        assert_eq!(hours, BTreeSet::from([9]));
    }

    #[test]
    fn test_partial_hours_at_both_ends() {
        let hours = hour_buckets(at(1, 9, 50), at(1, 12, 10));
        assert_eq!(hours, BTreeSet::from([9, 10, 11, 12]));
    }

    #[test]
    fn test_crossing_midnight() {
        let hours = hour_buckets(at(1, 23, 30), at(2, 1, 30));
        assert_eq!(hours, BTreeSet::from([23, 0, 1]));
    }

    #[test]
    fn test_end_on_hour_boundary_excluded() {
        // [09:00, 10:00) touches only hour 9
        let hours = hour_buckets(at(1, 9, 0), at(1, 10, 0));
        assert_eq!(hours, BTreeSet::from([9]));
    }

    #[test]
    fn test_zero_duration_single_hour() {
        let hours = hour_buckets(at(1, 14, 5), at(1, 14, 5));
        assert_eq!(hours, BTreeSet::from([14]));
    }

    #[test]
    fn test_multi_day_covers_all_hours() {
        let hours = hour_buckets(at(1, 8, 0), at(3, 8, 0));
        assert_eq!(hours.len(), 24);
    }

    #[test]
    fn test_date_and_weekday_keys() {
        let event = CanonicalEvent::new("x", at(1, 23, 30), at(2, 1, 30)).unwrap();
        // 2024-03-01 is a Friday; attribution follows the start instant
        assert_eq!(event_date(&event), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(event_weekday(&event), Weekday::Fri);
    }
}

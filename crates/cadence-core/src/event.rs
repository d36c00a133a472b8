//! Canonical event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized calendar event.
///
/// Created once during ingestion and immutable afterwards. Category and
/// time-bucket assignments are computed views over this record, never
/// stored on it, so the cache stays stable across re-categorization runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Raw free-text label; empty string if the source record had none
    pub label: String,
    /// Event start time
    pub start: DateTime<Utc>,
    /// Event end time; always >= start
    pub end: DateTime<Utc>,
    /// Seconds between start and end
    pub duration_seconds: f64,
}

impl CanonicalEvent {
    /// Build an event from its interval.
    ///
    /// Returns `None` when `end < start`; malformed intervals are rejected
    /// here rather than silently negated.
    pub fn new(label: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        if end < start {
            return None;
        }
        let duration_seconds = (end - start).num_milliseconds() as f64 / 1000.0;
        Some(Self {
            label: label.into(),
            start,
            end,
            duration_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_duration_from_interval() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();

        let event = CanonicalEvent::new("Standup", start, end).unwrap();
        assert_eq!(event.duration_seconds, 5400.0);
        assert_eq!(event.label, "Standup");
    }

    #[test]
    fn test_zero_duration_allowed() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let event = CanonicalEvent::new("", at, at).unwrap();
        assert_eq!(event.duration_seconds, 0.0);
    }

    #[test]
    fn test_reversed_interval_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        assert!(CanonicalEvent::new("Backwards", start, end).is_none());
    }
}

//! Wire types for the remote calendar service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC time window for an ingestion run, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Start or end descriptor of a raw event.
///
/// Timed records carry `dateTime`; whole-day records carry only `date`.
/// Both stay as wire strings here; parsing happens during normalization so
/// a bad value skips one record instead of failing a whole page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    /// RFC 3339 timestamp with offset
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,

    /// Whole-day date (YYYY-MM-DD), no time component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// IANA timezone name
    #[serde(rename = "timeZone", default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// One raw event as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEventRecord {
    /// Opaque event identifier
    #[serde(default)]
    pub id: String,

    /// Free-text event label; may be absent
    #[serde(default)]
    pub summary: Option<String>,

    /// Start descriptor; may be absent entirely
    #[serde(default)]
    pub start: Option<EventTime>,

    /// End descriptor; may be absent entirely
    #[serde(default)]
    pub end: Option<EventTime>,
}

/// One page of the event listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsPage {
    #[serde(default)]
    pub items: Vec<RawEventRecord>,

    /// Continuation cursor; absent on the final page
    #[serde(rename = "nextPageToken", default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

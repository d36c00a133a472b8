//! Paginated ingestion and record normalization

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use cadence_core::event::CanonicalEvent;

use crate::client::EventSource;
use crate::error::Result;
use crate::models::{EventTime, RawEventRecord, TimeWindow};

/// Why a raw record was dropped during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingStart,
    MissingEnd,
    UnparsableStart,
    UnparsableEnd,
    NegativeDuration,
}

/// Outcome of normalizing one raw record
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Event(CanonicalEvent),
    Skipped(SkipReason),
}

/// Result of one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Normalized events, in service order
    pub events: Vec<CanonicalEvent>,
    /// Raw records returned by the service
    pub fetched: usize,
    /// Records dropped as malformed
    pub skipped: usize,
}

/// Fetch every event in the window and normalize the results.
///
/// All-or-nothing: a failed page fetch aborts the run with nothing to
/// commit. Malformed records are skipped and counted, never fatal.
pub async fn ingest<S: EventSource>(
    source: &S,
    calendar_id: Option<&str>,
    window: TimeWindow,
) -> Result<IngestReport> {
    let raw = fetch_all(source, calendar_id, window).await?;
    let fetched = raw.len();

    let mut events = Vec::with_capacity(fetched);
    let mut skipped = 0usize;
    for record in &raw {
        match normalize(record) {
            Normalized::Event(event) => events.push(event),
            Normalized::Skipped(reason) => {
                skipped += 1;
                warn!("Skipping malformed record {:?}: {:?}", record.id, reason);
            }
        }
    }

    info!("Ingested {} events ({} skipped of {} fetched)", events.len(), skipped, fetched);
    Ok(IngestReport {
        events,
        fetched,
        skipped,
    })
}

/// Accumulate every page of the window.
///
/// Continues while the response carries a continuation cursor. The check
/// is for presence of the cursor field, never for emptiness of its value.
pub async fn fetch_all<S: EventSource>(
    source: &S,
    calendar_id: Option<&str>,
    window: TimeWindow,
) -> Result<Vec<RawEventRecord>> {
    let mut records = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = source
            .list_events(calendar_id, window, page_token.as_deref())
            .await?;
        records.extend(page.items);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    info!("Fetched {} raw events", records.len());
    Ok(records)
}

/// Normalize one raw record into a canonical event.
///
/// Whole-day descriptors resolve to midnight UTC. A missing label becomes
/// the empty string and flows through; it is a signal of its own, not a
/// reason to drop the record. Missing or unparsable instants and reversed
/// intervals are skipped.
pub fn normalize(raw: &RawEventRecord) -> Normalized {
    let start = match resolve_instant(raw.start.as_ref()) {
        ParsedInstant::At(dt) => dt,
        ParsedInstant::Missing => return Normalized::Skipped(SkipReason::MissingStart),
        ParsedInstant::Unparsable => return Normalized::Skipped(SkipReason::UnparsableStart),
    };
    let end = match resolve_instant(raw.end.as_ref()) {
        ParsedInstant::At(dt) => dt,
        ParsedInstant::Missing => return Normalized::Skipped(SkipReason::MissingEnd),
        ParsedInstant::Unparsable => return Normalized::Skipped(SkipReason::UnparsableEnd),
    };

    let label = raw.summary.clone().unwrap_or_default();
    match CanonicalEvent::new(label, start, end) {
        Some(event) => Normalized::Event(event),
        None => Normalized::Skipped(SkipReason::NegativeDuration),
    }
}

enum ParsedInstant {
    At(DateTime<Utc>),
    Missing,
    Unparsable,
}

fn resolve_instant(time: Option<&EventTime>) -> ParsedInstant {
    let Some(time) = time else {
        return ParsedInstant::Missing;
    };

    if let Some(date_time) = &time.date_time {
        return match DateTime::parse_from_rfc3339(date_time) {
            Ok(dt) => ParsedInstant::At(dt.with_timezone(&Utc)),
            Err(_) => ParsedInstant::Unparsable,
        };
    }

    if let Some(date) = &time.date {
        // Whole-day records follow the midnight UTC convention
        return match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(d) => ParsedInstant::At(d.and_hms_opt(0, 0, 0).unwrap().and_utc()),
            Err(_) => ParsedInstant::Unparsable,
        };
    }

    ParsedInstant::Missing
}

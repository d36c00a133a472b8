//! cadence-calendar: Remote calendar ingestion
//!
//! Talks to the remote calendar service through an injected authenticated
//! session, pages through the full event set of a time window, and
//! normalizes raw records into canonical events.
//!
//! ## Features
//!
//! - `EventSource` trait: the seam between ingestion and the service
//! - `CalendarClient`: reqwest implementation with bearer authentication
//! - Cursor-based pagination with presence-checked termination
//! - Normalization of timed, whole-day, and malformed records
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cadence_calendar::{ingest, CalendarClient, TimeWindow};
//!
//! let client = CalendarClient::new(access_token)?;
//! let report = ingest(&client, config.calendar_id.as_deref(), window).await?;
//! println!("{} events, {} skipped", report.events.len(), report.skipped);
//! ```

pub mod client;
pub mod error;
pub mod ingest;
pub mod models;

pub use client::{CalendarClient, EventSource, PAGE_SIZE};
pub use error::{CalendarError, Result};
pub use ingest::{fetch_all, ingest, normalize, IngestReport, Normalized, SkipReason};
pub use models::{EventTime, EventsPage, RawEventRecord, TimeWindow};

//! cadence-analysis: Time bucketing and aggregation
//!
//! Expands event intervals into the discrete time buckets they occupy and
//! aggregates categorized events into the tables downstream reporting
//! consumes: hour-of-day frequency tables, gap-filled daily duration
//! series, and trailing rolling means.
//!
//! Everything here is derived and recomputable from the canonical events
//! plus the taxonomy; none of it is a source of truth.

pub mod buckets;
pub mod frequency;
pub mod series;

pub use buckets::{event_date, event_weekday, hour_buckets};
pub use frequency::HourFrequencyTable;
pub use series::{daily_durations, rolling_mean, DailySeries, DEFAULT_ROLLING_WINDOW};

//! Error types for cadence-calendar

use thiserror::Error;

/// cadence-calendar error type
///
/// Any of these during a fetch aborts the whole ingestion run; pages
/// accumulated so far are discarded rather than partially committed.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Calendar API error: {0}")]
    Api(String),

    #[error("Response parse error: {0}")]
    Parse(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CalendarError>;

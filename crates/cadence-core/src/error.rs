//! Error types for cadence-core

use std::path::PathBuf;
use thiserror::Error;

/// Event cache errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No cache file exists yet; the caller should run ingestion.
    #[error("Event cache not found: {0}")]
    NotFound(PathBuf),

    /// The cache exists but does not parse. Distinct from `NotFound` so
    /// callers can decide between delete-and-refetch and aborting.
    #[error("Event cache is corrupt: {0}")]
    Corrupt(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
///
/// A missing config file is not an error; `Config::load` falls back to
/// defaults. These variants cover files that exist but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

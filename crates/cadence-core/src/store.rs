//! Durable event cache
//!
//! CSV-backed cache of normalized events. Once populated it is the source
//! of truth for analysis runs, so the remote service is only re-queried on
//! an explicit refresh.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::event::CanonicalEvent;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

const HEADER: [&str; 4] = ["label", "start", "end", "duration_seconds"];

/// CSV-backed event cache
pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    /// Create a store for the given cache file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a cache file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load all cached events.
    ///
    /// Returns `StoreError::NotFound` when no cache file exists yet, and
    /// `StoreError::Corrupt` when the file exists but does not parse.
    pub fn load(&self) -> Result<Vec<CanonicalEvent>> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        if headers.iter().ne(HEADER) {
            return Err(StoreError::Corrupt(format!(
                "unexpected header row: {:?}",
                headers
            )));
        }

        let mut events = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| StoreError::Corrupt(e.to_string()))?;
            events.push(parse_row(&record)?);
        }

        debug!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }

    /// Save events to the cache file.
    ///
    /// Writes to a temporary sibling and renames it over the target, so a
    /// crash mid-write never leaves a truncated cache behind.
    pub fn save(&self, events: &[CanonicalEvent]) -> Result<()> {
        let tmp_path = self.tmp_path();

        let mut writer = csv::Writer::from_path(&tmp_path)?;
        writer.write_record(HEADER)?;
        for event in events {
            writer.write_record([
                event.label.as_str(),
                &event.start.to_rfc3339(),
                &event.end.to_rfc3339(),
                &event.duration_seconds.to_string(),
            ])?;
        }
        writer.flush()?;
        drop(writer);

        std::fs::rename(&tmp_path, &self.path)?;
        info!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn parse_row(record: &csv::StringRecord) -> Result<CanonicalEvent> {
    let field = |i: usize| {
        record
            .get(i)
            .ok_or_else(|| StoreError::Corrupt(format!("row has {} fields", record.len())))
    };

    let label = field(0)?.to_string();
    let start = parse_timestamp(field(1)?)?;
    let end = parse_timestamp(field(2)?)?;
    let duration_seconds: f64 = field(3)?
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("bad duration: {}", e)))?;

    Ok(CanonicalEvent {
        label,
        start,
        end,
        duration_seconds,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp {:?}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_events() -> Vec<CanonicalEvent> {
        vec![
            CanonicalEvent::new(
                "Standup",
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap(),
            )
            .unwrap(),
            CanonicalEvent::new(
                "Lunch, with \"quotes\"\nand a newline",
                Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap(),
            )
            .unwrap(),
            CanonicalEvent::new(
                "",
                Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap(),
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::new(dir.path().join("events.csv"));

        let events = sample_events();
        store.save(&events).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, events);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::new(dir.path().join("events.csv"));

        match store.load() {
            Err(StoreError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_load_garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, "label,start,end,duration_seconds\nx,not-a-date,also-bad,1\n")
            .unwrap();

        let store = EventStore::new(&path);
        match store.load() {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("expected Corrupt, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_load_wrong_header_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let store = EventStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_save_replaces_existing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::new(dir.path().join("events.csv"));

        let events = sample_events();
        store.save(&events).unwrap();
        store.save(&events[..1]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!store.path().with_extension("csv.tmp").exists());
    }
}

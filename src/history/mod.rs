//! Bounded on-disk history of past summaries.
//!
//! Everything lives in one JSON slot (`~/.gistify/history.json`), an
//! ordered array of records, newest first, capped at [`MAX_RECORDS`]. Every
//! operation is a read-modify-write of the whole slot; there is no partial
//! update and callers must not interleave concurrent writes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Maximum records retained; older entries are evicted.
pub const MAX_RECORDS: usize = 50;

/// One stored summary. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// Creation time in epoch milliseconds, doubling as the record ID.
    pub id: i64,
    pub content: String,
    pub style: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// RFC 3339 creation timestamp.
    pub timestamp: String,
    pub source_url: String,
}

/// Single-slot JSON store for summary history.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `~/.gistify/history.json`.
    pub fn default_store() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".gistify")
            .join("history.json");
        Self::new(path)
    }

    /// All records, newest first.
    ///
    /// A missing slot is an empty history; an unreadable one is treated the
    /// same so a corrupt file never bricks the CLI.
    pub fn list(&self) -> Result<Vec<SummaryRecord>, std::io::Error> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("history slot unreadable, starting fresh: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Prepend a record, evicting the oldest beyond [`MAX_RECORDS`].
    pub fn append(&self, record: SummaryRecord) -> Result<(), std::io::Error> {
        let mut records = self.list()?;
        records.insert(0, record);
        records.truncate(MAX_RECORDS);
        self.write(&records)
    }

    /// Delete one record by ID. Returns whether anything was removed.
    pub fn delete(&self, id: i64) -> Result<bool, std::io::Error> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }

    /// Drop the whole slot.
    pub fn clear(&self) -> Result<(), std::io::Error> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Look up one record by ID.
    pub fn get(&self, id: i64) -> Result<Option<SummaryRecord>, std::io::Error> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    fn write(&self, records: &[SummaryRecord]) -> Result<(), std::io::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(records)?;
        std::fs::write(&self.path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> SummaryRecord {
        SummaryRecord {
            id,
            content: format!("summary {id}"),
            style: "tldr".to_string(),
            content_type: "article".to_string(),
            timestamp: "2026-08-06T12:00:00Z".to_string(),
            source_url: "https://example.com/post".to_string(),
        }
    }

    fn temp_store() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        (dir, store)
    }

    #[test]
    fn test_append_is_newest_first() {
        let (_dir, store) = temp_store();
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        store.append(record(3)).unwrap();

        let ids: Vec<_> = store.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, [3, 2, 1]);
    }

    #[test]
    fn test_eviction_beyond_cap() {
        let (_dir, store) = temp_store();
        for id in 0..60 {
            store.append(record(id)).unwrap();
        }

        let records = store.list().unwrap();
        assert_eq!(records.len(), MAX_RECORDS);
        // The last 50 appended, most recent first.
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        let expected: Vec<i64> = (10..60).rev().collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_delete_by_id() {
        let (_dir, store) = temp_store();
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();

        assert!(store.delete(1).unwrap());
        assert!(!store.delete(1).unwrap());
        let ids: Vec<_> = store.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, [2]);
    }

    #[test]
    fn test_clear() {
        let (_dir, store) = temp_store();
        store.append(record(1)).unwrap();
        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
        // Clearing an already-empty store is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_get() {
        let (_dir, store) = temp_store();
        store.append(record(7)).unwrap();
        assert_eq!(store.get(7).unwrap().unwrap().id, 7);
        assert!(store.get(8).unwrap().is_none());
    }

    #[test]
    fn test_missing_and_corrupt_slots_read_as_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list().unwrap().is_empty());

        std::fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        std::fs::write(&store.path, "{ not json").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_record_round_trips_with_camel_case_keys() {
        let json = serde_json::to_value(record(5)).unwrap();
        assert!(json.get("sourceUrl").is_some());
        assert!(json.get("type").is_some());
        let back: SummaryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record(5));
    }
}

//! JSON-file record store

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use habitgrid_core::{CompletionRecord, RecordStore, StoreError};

/// Current schema version of the store file.
pub const STORE_VERSION: u32 = 1;

/// Persisted store state: the whole document is rewritten on every mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoreState {
    version: u32,
    next_id: u64,
    start_date: Option<NaiveDate>,
    records: Vec<CompletionRecord>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            next_id: 0,
            start_date: None,
            records: Vec::new(),
        }
    }
}

/// Record store persisted as a single JSON document.
///
/// The file is loaded once at open; every mutation updates the in-memory
/// state and rewrites the file before returning. Failures to read, parse, or
/// write surface as [`StoreError::Transport`]. Concurrent writers are not
/// detected; the last write wins.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
    state: StoreState,
}

impl JsonStore {
    /// Open the store at `path`, creating an empty state if the file does
    /// not exist yet. The file itself is only written on the first mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| transport("read", &path, &e))?;
            let state: StoreState =
                serde_json::from_str(&raw).map_err(|e| transport("parse", &path, &e))?;
            if state.version > STORE_VERSION {
                return Err(StoreError::Transport(format!(
                    "unsupported store version {} in {}",
                    state.version,
                    path.display()
                )));
            }
            state
        } else {
            debug!(path = %path.display(), "starting with empty store");
            StoreState::default()
        };
        Ok(Self { path, state })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| transport("create dir for", &self.path, &e))?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.state)
            .map_err(|e| transport("encode", &self.path, &e))?;
        fs::write(&self.path, raw).map_err(|e| transport("write", &self.path, &e))?;
        Ok(())
    }
}

fn transport(action: &str, path: &Path, err: &dyn std::fmt::Display) -> StoreError {
    StoreError::Transport(format!("failed to {action} {}: {err}", path.display()))
}

impl RecordStore for JsonStore {
    fn list_records(&self) -> Result<Vec<CompletionRecord>, StoreError> {
        let mut records = self.state.records.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    fn create_record(
        &mut self,
        task: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<CompletionRecord, StoreError> {
        self.state.next_id += 1;
        let record = CompletionRecord {
            id: self.state.next_id.to_string(),
            task: task.to_string(),
            date,
            completed,
        };
        self.state.records.push(record.clone());
        self.save()?;
        Ok(record)
    }

    fn toggle_record(&mut self, id: &str) -> Result<CompletionRecord, StoreError> {
        let record = self
            .state
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.completed = !record.completed;
        let record = record.clone();
        self.save()?;
        Ok(record)
    }

    fn delete_record(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.state.records.len();
        self.state.records.retain(|r| r.id != id);
        if self.state.records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save()
    }

    fn start_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        Ok(self.state.start_date)
    }

    fn set_start_date(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        self.state.start_date = Some(date);
        self.save()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn open_without_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("habits.json")).unwrap();

        assert_eq!(store.list_records().unwrap(), vec![]);
        assert_eq!(store.start_date().unwrap(), None);
        // Nothing written until the first mutation
        assert!(!store.path().exists());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = JsonStore::open(&path).unwrap();
        let record = store.create_record("Read", date(2024, 1, 1), false).unwrap();
        store.toggle_record(&record.id).unwrap();
        store.set_start_date(date(2024, 1, 1)).unwrap();

        let store = JsonStore::open(&path).unwrap();
        let records = store.list_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].task, "Read");
        assert!(records[0].completed);
        assert_eq!(store.start_date().unwrap(), Some(date(2024, 1, 1)));
    }

    #[test]
    fn ids_keep_counting_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = JsonStore::open(&path).unwrap();
        let a = store.create_record("Read", date(2024, 1, 1), false).unwrap();

        let mut store = JsonStore::open(&path).unwrap();
        let b = store.create_record("Run", date(2024, 1, 2), false).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn corrupt_file_is_a_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }

    #[test]
    fn newer_store_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        fs::write(
            &path,
            r#"{"version": 99, "next_id": 0, "start_date": null, "records": []}"#,
        )
        .unwrap();

        let err = JsonStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }

    #[test]
    fn delete_rewrites_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = JsonStore::open(&path).unwrap();
        let record = store.create_record("Read", date(2024, 1, 1), false).unwrap();
        store.delete_record(&record.id).unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert!(store.list_records().unwrap().is_empty());
    }
}

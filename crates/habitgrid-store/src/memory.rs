//! In-memory record store

use chrono::NaiveDate;

use habitgrid_core::{CompletionRecord, RecordStore, StoreError};

/// Vector-backed store with counter-assigned ids.
///
/// Insertion order is preserved internally; `list_records` applies the
/// date-descending store-side sort, stable within a date.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Vec<CompletionRecord>,
    start_date: Option<NaiveDate>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn list_records(&self) -> Result<Vec<CompletionRecord>, StoreError> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    fn create_record(
        &mut self,
        task: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<CompletionRecord, StoreError> {
        self.next_id += 1;
        let record = CompletionRecord {
            id: self.next_id.to_string(),
            task: task.to_string(),
            date,
            completed,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn toggle_record(&mut self, id: &str) -> Result<CompletionRecord, StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.completed = !record.completed;
        Ok(record.clone())
    }

    fn delete_record(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn start_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        Ok(self.start_date)
    }

    fn set_start_date(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        self.start_date = Some(date);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

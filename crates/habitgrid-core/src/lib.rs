//! # habitgrid-core
//!
//! Core domain model and grid engine for habitgrid.
//!
//! This crate provides:
//! - Domain types: `CompletionRecord`, the derived task registry
//! - The sliding 10-day date window and completion index
//! - Per-task and per-day completion percentages
//! - `GridController`: the toggle/add/start-date protocol over a `RecordStore`
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use habitgrid_core::{window, CompletionRecord, GridView};
//!
//! let records = vec![
//!     CompletionRecord {
//!         id: "1".into(),
//!         task: "Read".into(),
//!         date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!         completed: true,
//!     },
//! ];
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let dates = window::date_window(today, 0);
//! let view = GridView::build(&records, Some(start), &dates, today);
//!
//! assert_eq!(view.rows[0].task, "Read");
//! assert_eq!(view.rows[0].percentage, 100);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod controller;
pub mod grid;
pub mod window;

pub use controller::{GridController, GridSession, Snapshot};
pub use grid::{task_names, CompletionIndex, GridRow, GridView};

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a completion record, assigned by the store
pub type RecordId = String;

// ============================================================================
// Completion Record
// ============================================================================

/// One `(task, date, completed)` fact, owned by the record store.
///
/// Tasks have no independent record of their own: a task exists exactly as
/// long as at least one completion record references its name. The store does
/// not enforce `(task, date)` uniqueness; when duplicates occur, the first
/// record in store order wins (see [`CompletionIndex`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Store-assigned identifier
    pub id: RecordId,
    /// Task name (case-sensitive, no normalization)
    pub task: String,
    /// Calendar day this record tracks
    pub date: NaiveDate,
    /// Whether the task was completed on `date`
    pub completed: bool,
}

// ============================================================================
// Store Contract
// ============================================================================

/// The external record store consumed by [`GridController`].
///
/// The engine treats the store as the sole source of truth: every mutation
/// is followed by a full reload, and no derived state survives a refresh.
/// Persistence guarantees are the store's business; the contract here is
/// "last write wins".
pub trait RecordStore {
    /// List all completion records, ordered by date descending.
    fn list_records(&self) -> Result<Vec<CompletionRecord>, StoreError>;

    /// Create a new record and return it with its assigned id.
    fn create_record(
        &mut self,
        task: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<CompletionRecord, StoreError>;

    /// Invert the `completed` flag of an existing record.
    fn toggle_record(&mut self, id: &str) -> Result<CompletionRecord, StoreError>;

    /// Delete a record by id.
    fn delete_record(&mut self, id: &str) -> Result<(), StoreError>;

    /// The configured start date, if one has been set.
    fn start_date(&self) -> Result<Option<NaiveDate>, StoreError>;

    /// Persist the start date setting.
    fn set_start_date(&mut self, date: NaiveDate) -> Result<(), StoreError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rejection of a requested action before any store call is made.
///
/// Validation failures are surfaced to the user and leave both the store and
/// the session (including the pending-input buffer) untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task name is empty")]
    EmptyTaskName,

    #[error("task already exists: {0}")]
    DuplicateTask(String),

    #[error("start date {date} outside allowed range {min}..={max}")]
    StartDateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
}

/// Failure reported by the record store
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(RecordId),

    #[error("store transport failure: {0}")]
    Transport(String),
}

/// Any failure of a grid engine operation
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

// ============================================================================
// Tests
// ============================================================================

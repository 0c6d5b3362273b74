//! Grid controller: the mutate-then-reload protocol
//!
//! The controller is the only component that talks to the record store. Every
//! mutation is two sequential store calls: the write, then a full reload of
//! records and settings. There is no incremental patching of client-held
//! state and no optimistic update; a failed action leaves the previously
//! loaded snapshot untouched.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{self, GridView};
use crate::window;
use crate::{CompletionRecord, GridError, RecordStore, ValidationError};

// ============================================================================
// Session State
// ============================================================================

/// The records and settings loaded by the last full reload
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All completion records, in store order (date descending)
    pub records: Vec<CompletionRecord>,
    /// Configured start date, if any
    pub start_date: Option<NaiveDate>,
}

/// Explicit per-session state.
///
/// Everything the grid keeps between store reloads lives here: the window
/// offset, the pending new-task input, and the loaded snapshot. The struct is
/// serializable so a host can persist a session across invocations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSession {
    /// Days between today and the window's end date; always non-negative
    pub offset: u32,
    /// Buffered name for the next add-task action
    pub pending_input: String,
    /// Last loaded store state
    pub snapshot: Snapshot,
}

impl GridSession {
    /// Fresh session: offset 0, empty input, empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the window one page further into the past.
    pub fn shift_back(&mut self) {
        self.offset = window::shift_back(self.offset);
    }

    /// Shift the window one page toward today, clamping at the present.
    pub fn shift_forward(&mut self) {
        self.offset = window::shift_forward(self.offset);
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Orchestrates the grid's three user actions against a [`RecordStore`].
pub struct GridController<S: RecordStore> {
    store: S,
    today: NaiveDate,
}

impl<S: RecordStore> GridController<S> {
    /// Controller anchored at the local calendar date.
    pub fn new(store: S) -> Self {
        Self::at_date(store, Local::now().date_naive())
    }

    /// Controller anchored at an explicit date. Lets tests (and replay
    /// tooling) pin "today".
    pub fn at_date(store: S, today: NaiveDate) -> Self {
        Self { store, today }
    }

    /// The anchor date the window offset counts back from.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Direct access to the underlying store, for operations outside the
    /// grid protocol (e.g. deleting a record by id). Callers are expected to
    /// [`refresh`](Self::refresh) afterwards.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Full reload: replace the snapshot with a fresh read of records and
    /// settings. On failure the previous snapshot is kept.
    pub fn refresh(&mut self, session: &mut GridSession) -> Result<(), GridError> {
        let records = self.store.list_records()?;
        let start_date = self.store.start_date()?;
        debug!(records = records.len(), ?start_date, "reloaded snapshot");
        session.snapshot = Snapshot {
            records,
            start_date,
        };
        Ok(())
    }

    /// Toggle the cell for `(task, date)`.
    ///
    /// An existing record has its `completed` flag inverted. A missing record
    /// is created with `completed = false`, so the first click on an
    /// untracked cell tracks the day without marking it complete and a second
    /// click is needed to complete it. That two-step behavior is part of the
    /// contract. When duplicate records exist for the pair, the first one in
    /// record order is the toggle target.
    pub fn toggle(
        &mut self,
        session: &mut GridSession,
        task: &str,
        date: NaiveDate,
    ) -> Result<(), GridError> {
        let existing = session
            .snapshot
            .records
            .iter()
            .find(|r| r.task == task && r.date == date)
            .map(|r| r.id.clone());

        match existing {
            Some(id) => {
                debug!(task, %date, %id, "toggling existing record");
                self.store.toggle_record(&id)?;
            }
            None => {
                debug!(task, %date, "creating untracked cell");
                self.store.create_record(task, date, false)?;
            }
        }
        self.refresh(session)
    }

    /// Add a new task from the session's pending input.
    ///
    /// Rejects empty or whitespace-only names and names already present in
    /// the registry (exact, case-sensitive match); rejection keeps the input
    /// buffer and writes nothing. On success one record is created for today
    /// with `completed = false`, the buffer is cleared, and the snapshot is
    /// reloaded.
    pub fn add_task(&mut self, session: &mut GridSession) -> Result<(), GridError> {
        let name = session.pending_input.clone();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyTaskName.into());
        }
        if grid::task_names(&session.snapshot.records).contains(&name) {
            return Err(ValidationError::DuplicateTask(name).into());
        }

        debug!(task = %name, "adding task");
        self.store.create_record(&name, self.today, false)?;
        session.pending_input.clear();
        self.refresh(session)
    }

    /// Persist a new start date.
    ///
    /// The date must lie within the currently displayed window's start and
    /// today, inclusive.
    pub fn set_start_date(
        &mut self,
        session: &mut GridSession,
        date: NaiveDate,
    ) -> Result<(), GridError> {
        let window = window::date_window(self.today, session.offset);
        let min = window[0];
        let max = self.today;
        if date < min || date > max {
            return Err(ValidationError::StartDateOutOfRange { date, min, max }.into());
        }

        debug!(%date, "setting start date");
        self.store.set_start_date(date)?;
        self.refresh(session)
    }

    /// Compute the renderable grid for the session's current window.
    pub fn view(&self, session: &GridSession) -> GridView {
        let window = window::date_window(self.today, session.offset);
        GridView::build(
            &session.snapshot.records,
            session.snapshot.start_date,
            &window,
            self.today,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

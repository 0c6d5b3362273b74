//! Completion index, task registry, and percentage calculations
//!
//! Everything here is a pure projection of the record list. Nothing is
//! cached between reloads; the controller rebuilds these structures from a
//! fresh store read after every mutation.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::{CompletionRecord, RecordId};

// ============================================================================
// Completion Index
// ============================================================================

#[derive(Clone, Debug)]
struct Cell {
    id: RecordId,
    completed: bool,
}

/// Sparse `(task, date)` lookup built once per render.
///
/// `is_completed` answers `true` only for a record with `completed == true`;
/// an absent pair and a tracked-but-missed record both answer `false`. The
/// store schema does not guarantee `(task, date)` uniqueness: when duplicate
/// records exist, the first one in record order wins and the rest are
/// ignored. That resolution is a documented limitation, not an invariant.
#[derive(Clone, Debug, Default)]
pub struct CompletionIndex {
    by_task: HashMap<String, HashMap<NaiveDate, Cell>>,
}

impl CompletionIndex {
    /// Build the index from the raw record sequence.
    pub fn build(records: &[CompletionRecord]) -> Self {
        let mut by_task: HashMap<String, HashMap<NaiveDate, Cell>> = HashMap::new();
        for record in records {
            by_task
                .entry(record.task.clone())
                .or_default()
                .entry(record.date)
                .or_insert_with(|| Cell {
                    id: record.id.clone(),
                    completed: record.completed,
                });
        }
        Self { by_task }
    }

    fn cell(&self, task: &str, date: NaiveDate) -> Option<&Cell> {
        self.by_task.get(task)?.get(&date)
    }

    /// Was `task` completed on `date`?
    pub fn is_completed(&self, task: &str, date: NaiveDate) -> bool {
        self.cell(task, date).is_some_and(|c| c.completed)
    }

    /// Id of the record backing `(task, date)`, if one exists.
    pub fn record_id(&self, task: &str, date: NaiveDate) -> Option<&str> {
        self.cell(task, date).map(|c| c.id.as_str())
    }
}

// ============================================================================
// Task Registry
// ============================================================================

/// Distinct task names in first-seen record order.
///
/// Identity is exact-string and case-sensitive; `"read"` and `"Read"` are
/// different tasks, as are names differing only in whitespace.
pub fn task_names(records: &[CompletionRecord]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        if seen.insert(record.task.as_str()) {
            names.push(record.task.clone());
        }
    }
    names
}

// ============================================================================
// Percentages
// ============================================================================

/// Round-half-up integer percentage
fn percent(completed: usize, total: usize) -> u8 {
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Completion percentage for one task across the window.
///
/// Only dates on or after the start date count toward the denominator. With
/// no start date configured the eligible set is empty and the result is 0.
pub fn task_percentage(
    index: &CompletionIndex,
    task: &str,
    window: &[NaiveDate],
    start_date: Option<NaiveDate>,
) -> u8 {
    let eligible: Vec<NaiveDate> = match start_date {
        Some(start) => window.iter().copied().filter(|d| *d >= start).collect(),
        None => Vec::new(),
    };
    if eligible.is_empty() {
        return 0;
    }
    let completed = eligible
        .iter()
        .filter(|d| index.is_completed(task, **d))
        .count();
    percent(completed, eligible.len())
}

/// Completion percentage for one day across all tasks.
///
/// Returns `None` for dates before the configured start date ("not yet
/// tracked"). With no start date configured every window date is counted.
/// An empty task registry yields 0.
pub fn day_percentage(
    index: &CompletionIndex,
    date: NaiveDate,
    start_date: Option<NaiveDate>,
    tasks: &[String],
) -> Option<u8> {
    if let Some(start) = start_date {
        if date < start {
            return None;
        }
    }
    if tasks.is_empty() {
        return Some(0);
    }
    let completed = tasks
        .iter()
        .filter(|task| index.is_completed(task, date))
        .count();
    Some(percent(completed, tasks.len()))
}

// ============================================================================
// Grid View
// ============================================================================

/// One rendered task row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridRow {
    /// Task name
    pub task: String,
    /// Completion flag per window date, ascending
    pub cells: Vec<bool>,
    /// Task percentage over the eligible window dates
    pub percentage: u8,
}

/// The fully computed grid for one window: the renderable projection of a
/// snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridView {
    /// Window dates, ascending
    pub window: Vec<NaiveDate>,
    /// The anchor date the window offset counts back from
    pub today: NaiveDate,
    /// Configured start date, if any
    pub start_date: Option<NaiveDate>,
    /// One row per distinct task, first-seen order
    pub rows: Vec<GridRow>,
    /// Per-day percentage, `None` before the start date
    pub day_percentages: Vec<Option<u8>>,
}

impl GridView {
    /// Compute the grid from a record snapshot.
    pub fn build(
        records: &[CompletionRecord],
        start_date: Option<NaiveDate>,
        window: &[NaiveDate],
        today: NaiveDate,
    ) -> Self {
        let index = CompletionIndex::build(records);
        let tasks = task_names(records);

        let rows = tasks
            .iter()
            .map(|task| GridRow {
                task: task.clone(),
                cells: window.iter().map(|d| index.is_completed(task, *d)).collect(),
                percentage: task_percentage(&index, task, window, start_date),
            })
            .collect();

        let day_percentages = window
            .iter()
            .map(|d| day_percentage(&index, *d, start_date, &tasks))
            .collect();

        Self {
            window: window.to_vec(),
            today,
            start_date,
            rows,
            day_percentages,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

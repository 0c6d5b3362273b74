//! Text rendering of the progress grid
//!
//! Pure `GridView -> String` formatting: task rows with checkbox cells, a
//! per-task percentage column, and a daily-percentage footer. Dates before
//! the configured start date render as `-` ("not yet tracked").

use chrono::NaiveDate;
use habitgrid_core::GridView;

const NAME_WIDTH: usize = 16;
const CELL_WIDTH: usize = 8;

fn short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width - 1).collect();
        format!("{kept}~")
    }
}

/// Render the grid as a fixed-width text table.
pub fn render_grid(view: &GridView) -> String {
    let mut out = String::new();

    let first = view.window[0];
    let last = *view.window.last().expect("window is never empty");
    out.push_str(&format!("{} -> {}\n", short_date(first), short_date(last)));
    if let Some(start) = view.start_date {
        out.push_str(&format!("Stats from: {start}\n"));
    }
    out.push('\n');

    // Header: short date labels, today starred
    out.push_str(&pad("Task", NAME_WIDTH));
    for date in &view.window {
        let mut label = short_date(*date);
        if *date == view.today {
            label.push('*');
        }
        out.push_str(&pad(&label, CELL_WIDTH));
    }
    out.push_str("   %\n");

    // Task rows
    for row in &view.rows {
        out.push_str(&pad(&clip(&row.task, NAME_WIDTH - 2), NAME_WIDTH));
        for completed in &row.cells {
            out.push_str(&pad(if *completed { "[x]" } else { "[ ]" }, CELL_WIDTH));
        }
        out.push_str(&format!("{:>4}\n", format!("{}%", row.percentage)));
    }

    // Daily summary
    out.push_str(&pad("Daily %", NAME_WIDTH));
    for pct in &view.day_percentages {
        let label = pct.map_or_else(|| "-".to_string(), |p| format!("{p}%"));
        out.push_str(&pad(&label, CELL_WIDTH));
    }
    out.push_str("   -\n");

    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use habitgrid_core::{window, CompletionRecord};
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_view() -> GridView {
        let today = date(2024, 5, 20);
        let records = vec![
            CompletionRecord {
                id: "1".into(),
                task: "Read".into(),
                date: today,
                completed: true,
            },
            CompletionRecord {
                id: "2".into(),
                task: "Run".into(),
                date: today,
                completed: false,
            },
        ];
        let dates = window::date_window(today, 0);
        GridView::build(&records, Some(today), &dates, today)
    }

    #[test]
    fn renders_range_and_start_date() {
        let text = render_grid(&sample_view());
        assert!(text.starts_with("May 11 -> May 20\n"));
        assert!(text.contains("Stats from: 2024-05-20\n"));
    }

    #[test]
    fn marks_today_in_the_header() {
        let text = render_grid(&sample_view());
        assert!(text.contains("May 20*"));
        assert!(!text.contains("May 19*"));
    }

    #[test]
    fn renders_cells_and_task_percentages() {
        let text = render_grid(&sample_view());
        let read_row = text.lines().find(|l| l.starts_with("Read")).unwrap();
        assert!(read_row.contains("[x]"));
        assert!(read_row.ends_with("100%"));

        let run_row = text.lines().find(|l| l.starts_with("Run")).unwrap();
        assert!(!run_row.contains("[x]"));
        assert!(run_row.ends_with("0%"));
    }

    #[test]
    fn untracked_days_render_as_dash() {
        let text = render_grid(&sample_view());
        let summary = text.lines().find(|l| l.starts_with("Daily %")).unwrap();

        // Nine pre-start-date columns plus the trailing placeholder
        assert_eq!(summary.matches('-').count(), 10);
        assert!(summary.contains("50%"));
    }

    #[test]
    fn long_task_names_are_clipped() {
        let today = date(2024, 5, 20);
        let records = vec![CompletionRecord {
            id: "1".into(),
            task: "A task with a very long name".into(),
            date: today,
            completed: false,
        }];
        let dates = window::date_window(today, 0);
        let view = GridView::build(&records, None, &dates, today);

        let text = render_grid(&view);
        assert!(text.contains("A task with a~"));
    }
}

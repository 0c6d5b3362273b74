//! Sliding date window
//!
//! The grid always displays [`WINDOW_DAYS`] consecutive calendar days. The
//! window is anchored by a non-negative offset counted backwards from today:
//! offset 0 ends at today, offset 10 ends ten days ago, and so on. Shifting
//! moves the offset in whole-window steps and clamps at the present.

use chrono::{Days, NaiveDate};

/// Number of calendar days shown per window
pub const WINDOW_DAYS: u32 = 10;

/// Generate the window ending at `today - offset` days.
///
/// Returns [`WINDOW_DAYS`] dates in ascending order. Dates are produced by
/// calendar subtraction, so month and year rollover come out right.
pub fn date_window(today: NaiveDate, offset: u32) -> Vec<NaiveDate> {
    (0..WINDOW_DAYS)
        .rev()
        .map(|i| today - Days::new(u64::from(offset + i)))
        .collect()
}

/// Move the offset one window further into the past. Unbounded.
pub fn shift_back(offset: u32) -> u32 {
    offset + WINDOW_DAYS
}

/// Move the offset one window toward today, clamping at 0.
pub fn shift_forward(offset: u32) -> u32 {
    offset.saturating_sub(WINDOW_DAYS)
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
    fn window_has_ten_ascending_days_ending_today() {
        let today = date(2024, 6, 15);
        let window = date_window(today, 0);

        assert_eq!(window.len(), WINDOW_DAYS as usize);
        assert_eq!(*window.last().unwrap(), today);
        assert_eq!(window[0], date(2024, 6, 6));
        assert!(window.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn window_end_tracks_offset() {
        let today = date(2024, 6, 15);
        for offset in [0, 1, 10, 20, 365] {
            let window = date_window(today, offset);
            assert_eq!(window.len(), 10);
            assert_eq!(*window.last().unwrap(), today - Days::new(u64::from(offset)));
            assert!(window.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn window_crosses_month_boundary() {
        let today = date(2024, 3, 5);
        let window = date_window(today, 0);

        // 2024 is a leap year, so the window reaches back into late February
        assert_eq!(window[0], date(2024, 2, 25));
        assert!(window.contains(&date(2024, 2, 29)));
        assert_eq!(*window.last().unwrap(), today);
    }

    #[test]
    fn window_crosses_year_boundary() {
        let today = date(2025, 1, 3);
        let window = date_window(today, 0);

        assert_eq!(window[0], date(2024, 12, 25));
        assert_eq!(*window.last().unwrap(), today);
    }

    #[test]
    fn shift_back_grows_without_bound() {
        let mut offset = 0;
        for step in 1..=5 {
            offset = shift_back(offset);
            assert_eq!(offset, step * WINDOW_DAYS);
        }
    }

    #[test]
    fn shift_forward_clamps_at_zero() {
        assert_eq!(shift_forward(20), 10);
        assert_eq!(shift_forward(10), 0);
        assert_eq!(shift_forward(0), 0);

        // Off-step offsets clamp rather than wrapping negative
        assert_eq!(shift_forward(shift_forward(5)), 0);
    }
}

//! Monthly calendar grid

use crate::core::models::RecordHistory;
use chrono::{Datelike, NaiveDate};

/// One day cell in the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// The calendar day this cell represents
    pub day: NaiveDate,
    /// Day-of-month label (1-based)
    pub label: u32,
    /// The recorded outcome, when the day has a record
    pub outcome: Option<bool>,
}

/// A month of day cells, laid out for a Sunday-first week grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Empty cells before day 1 (the first day's Sunday-based weekday index)
    pub leading_blanks: usize,
    /// One cell per day of the month, in order
    pub cells: Vec<DayCell>,
}

impl CalendarMonth {
    /// Build the grid for a month, marking days that have records.
    ///
    /// Returns `None` for an invalid year/month pair.
    #[must_use]
    pub fn build(history: &RecordHistory, year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let leading_blanks = first.weekday().num_days_from_sunday() as usize;

        let mut cells = Vec::new();
        let mut day = first;
        while day.month() == month {
            cells.push(DayCell {
                day,
                label: day.day(),
                outcome: history.get(day).map(|record| record.success),
            });
            day = day.succ_opt()?;
        }

        Some(Self {
            year,
            month,
            leading_blanks,
            cells,
        })
    }

    /// Number of days in the month
    #[must_use]
    pub const fn total_days(&self) -> usize {
        self.cells.len()
    }

    /// Human-readable month label, e.g. "May 2024"
    #[must_use]
    pub fn label(&self) -> String {
        const MONTH_NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        let name = MONTH_NAMES
            .get(self.month as usize - 1)
            .copied()
            .unwrap_or("Unknown");
        format!("{name} {}", self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::DailyRecord;
    use chrono::{TimeZone, Utc};

    fn record(day: &str, success: bool) -> DailyRecord {
        DailyRecord::new(
            day.parse().expect("valid date literal"),
            success,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn may_2024_layout() {
        let calendar =
            CalendarMonth::build(&RecordHistory::new(), 2024, 5).expect("valid month");

        // 2024-05-01 is a Wednesday
        assert_eq!(calendar.leading_blanks, 3);
        assert_eq!(calendar.total_days(), 31);
        assert_eq!(calendar.label(), "May 2024");
    }

    #[test]
    fn leap_february_has_29_cells() {
        let calendar =
            CalendarMonth::build(&RecordHistory::new(), 2024, 2).expect("valid month");

        assert_eq!(calendar.total_days(), 29);
    }

    #[test]
    fn cells_carry_recorded_outcomes() {
        let history = RecordHistory::from_records(vec![
            record("2024-05-01", true),
            record("2024-05-02", false),
        ]);
        let calendar = CalendarMonth::build(&history, 2024, 5).expect("valid month");

        assert_eq!(calendar.cells[0].outcome, Some(true));
        assert_eq!(calendar.cells[1].outcome, Some(false));
        assert_eq!(calendar.cells[2].outcome, None);
        assert_eq!(calendar.cells[30].label, 31);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(CalendarMonth::build(&RecordHistory::new(), 2024, 13).is_none());
        assert!(CalendarMonth::build(&RecordHistory::new(), 2024, 0).is_none());
    }
}

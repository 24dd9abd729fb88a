//! Report generation for the monthly dashboard
//!
//! Builds a calendar view of a month's records plus the computed statistics,
//! rendered to Markdown or self-contained HTML.

pub mod calendar;
pub mod formats;

use crate::core::models::RecordHistory;
use crate::core::stats::StreakStats;
use std::error::Error;
use std::path::Path;

pub use calendar::{CalendarMonth, DayCell};
pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
///
/// Aggregates everything needed to render one monthly report, providing a
/// single source of truth for templates.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Full record snapshot the statistics were computed from
    pub history: &'a RecordHistory,
    /// Computed statistics
    pub stats: &'a StreakStats,
    /// Calendar grid for the reported month
    pub calendar: &'a CalendarMonth,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        history: &'a RecordHistory,
        stats: &'a StreakStats,
        calendar: &'a CalendarMonth,
    ) -> Self {
        Self {
            history,
            stats,
            calendar,
        }
    }

    /// Month heading, e.g. "May 2024"
    #[must_use]
    pub fn month_label(&self) -> String {
        self.calendar.label()
    }

    /// Display form of the elapsed-since-failure statistic
    #[must_use]
    pub fn elapsed_label(&self) -> String {
        self.stats
            .since_last_failure
            .map_or_else(|| "no failure recorded".to_string(), |e| e.to_string())
    }

    /// Days with any record at all
    #[must_use]
    pub const fn recorded_days(&self) -> usize {
        self.history.len()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

//! Markdown report generator
//!
//! Generates monthly streak reports in Markdown format with a weekday
//! calendar table. These reports render well in GitHub, GitLab, and VS Code.

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{month_label}}", &ctx.month_label());
        output = output.replace(
            "{{current_streak}}",
            &ctx.stats.current_streak.to_string(),
        );
        output = output.replace("{{best_streak}}", &ctx.stats.best_streak.to_string());
        output = output.replace("{{month_success}}", &ctx.stats.month_success.to_string());
        output = output.replace("{{month_total}}", &ctx.stats.month_total.to_string());
        output = output.replace("{{success_rate}}", &ctx.stats.success_rate.to_string());
        output = output.replace("{{since_last_failure}}", &ctx.elapsed_label());
        output = output.replace("{{recorded_days}}", &ctx.recorded_days().to_string());

        let calendar_table = Self::generate_calendar_table(ctx);
        output = output.replace("{{calendar_table}}", &calendar_table);

        output
    }

    /// Generate the weekday calendar table
    fn generate_calendar_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Sun | Mon | Tue | Wed | Thu | Fri | Sat |\n");
        table.push_str("|---|---|---|---|---|---|---|\n");

        let mut week: Vec<String> = vec![String::new(); ctx.calendar.leading_blanks];

        for cell in &ctx.calendar.cells {
            let marker = match cell.outcome {
                Some(true) => format!("{} ✅", cell.label),
                Some(false) => format!("{} ❌", cell.label),
                None => cell.label.to_string(),
            };
            week.push(marker);

            if week.len() == 7 {
                let _ = writeln!(table, "| {} |", week.join(" | "));
                week.clear();
            }
        }

        // Pad and flush the trailing partial week
        if !week.is_empty() {
            while week.len() < 7 {
                week.push(String::new());
            }
            let _ = writeln!(table, "| {} |", week.join(" | "));
        }

        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

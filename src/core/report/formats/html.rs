//! HTML report generator
//!
//! Generates monthly streak reports in HTML format with a grid-based
//! calendar. The generated HTML is self-contained with embedded CSS.

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

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

        let calendar_cells = Self::generate_calendar_cells(ctx);
        output = output.replace("{{calendar_cells}}", &calendar_cells);

        output
    }

    /// Generate the day cells for the calendar grid
    fn generate_calendar_cells(ctx: &ReportContext) -> String {
        let mut cells = String::new();

        for _ in 0..ctx.calendar.leading_blanks {
            cells.push_str("    <div class=\"day blank\"></div>\n");
        }

        for cell in &ctx.calendar.cells {
            let class = match cell.outcome {
                Some(true) => "day achieved",
                Some(false) => "day missed",
                None => "day",
            };
            let _ = writeln!(
                cells,
                "    <div class=\"{class}\">{}</div>",
                cell.label
            );
        }

        cells
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

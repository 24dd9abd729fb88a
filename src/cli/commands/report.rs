//! Report command handler
//!
//! Generates monthly streak reports (Markdown or HTML) with the calendar
//! grid and computed statistics.

use chrono::{Datelike, Local, Utc};
use logger::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use streakboard::config::Config;
use streakboard::core::report::{
    CalendarMonth, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use streakboard::core::session::Session;
use streakboard::core::stats::{compute_stats, month_tally, success_rate, StreakStats};
use streakboard::core::store::HttpRecordStore;

/// Run the report command.
///
/// # Arguments
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `month` - Optional reference month as `YYYY-MM`
/// * `config` - Configuration containing the store and output directory
pub fn run(output_file: Option<&Path>, format_str: &str, month: Option<&str>, config: &Config) {
    if let Err(err) = generate_report(output_file, format_str, month, config) {
        error!("Report generation failed: {err}");
        eprintln!("{err}");
    }
}

fn generate_report(
    output_file: Option<&Path>,
    format_str: &str,
    month: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e}. Use: markdown or html"))?;

    let today = Local::now().date_naive();
    let (year, ref_month) = match month {
        Some(value) => parse_month(value)?,
        None => (today.year(), today.month()),
    };

    let store = HttpRecordStore::from_config(&config.store).map_err(|e| format!("✗ {e}"))?;

    let mut session = Session::new();
    session
        .load_from(&store)
        .map_err(|e| format!("✗ Failed to load records: {e}"))?;
    info!("Loaded {} records from the store", session.history().len());

    let history = session.history();
    let calendar = CalendarMonth::build(history, year, ref_month)
        .ok_or_else(|| format!("✗ Not a valid month: {year}-{ref_month:02}"))?;

    // Streaks are global; the monthly tally follows the reported month
    let (month_success, month_total) = month_tally(history, year, ref_month);
    let stats = StreakStats {
        month_success,
        month_total,
        success_rate: success_rate(month_success, month_total),
        ..compute_stats(history, today, Utc::now())
    };

    let ctx = ReportContext::new(history, &stats, &calendar);

    let final_output_path = resolve_output_path(output_file, format, &calendar, config)?;
    write_report(&ctx, format, &final_output_path)?;

    println!("✓ Report generated: {}", final_output_path.display());
    info!("Report exported to: {}", final_output_path.display());

    println!("\n=== Summary ===");
    println!("Month: {}", calendar.label());
    println!("Recorded days: {month_total}");
    println!("Success rate: {}%", stats.success_rate);
    println!("Best streak: {} days", stats.best_streak);

    Ok(())
}

/// Parse a `YYYY-MM` month argument
fn parse_month(value: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("✗ Invalid month '{value}'. Use the form YYYY-MM, e.g. 2024-05");

    let (year_str, month_str) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month: u32 = month_str.parse().map_err(|_| invalid())?;

    if (1..=12).contains(&month) {
        Ok((year, month))
    } else {
        Err(invalid())
    }
}

/// Pick the output path: explicit file, or the reports directory
fn resolve_output_path(
    output_file: Option<&Path>,
    format: ReportFormat,
    calendar: &CalendarMonth,
    config: &Config,
) -> Result<PathBuf, String> {
    if let Some(output) = output_file {
        return Ok(output.to_path_buf());
    }

    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let output_filename = format!(
        "streaks_{}-{:02}.{}",
        calendar.year,
        calendar.month,
        format.extension()
    );
    Ok(reports_dir.join(output_filename))
}

/// Write the report to a file in the specified format
fn write_report(ctx: &ReportContext, format: ReportFormat, output_path: &Path) -> Result<(), String> {
    match format {
        ReportFormat::Markdown => {
            let reporter = MarkdownReporter::new();
            reporter
                .generate(ctx, output_path)
                .map_err(|e| format!("✗ Failed to generate Markdown report: {e}"))?;
        }
        ReportFormat::Html => {
            let reporter = HtmlReporter::new();
            reporter
                .generate(ctx, output_path)
                .map_err(|e| format!("✗ Failed to generate HTML report: {e}"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_month_accepts_valid_values() {
        assert_eq!(parse_month("2024-05"), Ok((2024, 5)));
        assert_eq!(parse_month("2023-12"), Ok((2023, 12)));
    }

    #[test]
    fn parse_month_rejects_invalid_values() {
        assert!(parse_month("2024").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-00").is_err());
        assert!(parse_month("may-2024").is_err());
    }
}

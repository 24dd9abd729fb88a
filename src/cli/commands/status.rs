//! Status command handler
//!
//! Loads the record snapshot from the configured store, computes the streak
//! statistics, and prints the dashboard with this month's calendar.

use chrono::{Datelike, Local, NaiveDate, Utc};
use logger::{error, info};
use streakboard::config::Config;
use streakboard::core::models::RecordHistory;
use streakboard::core::report::CalendarMonth;
use streakboard::core::session::Session;
use streakboard::core::stats::{compute_stats, StreakStats};
use streakboard::core::store::HttpRecordStore;

/// Run the status command.
///
/// # Arguments
/// * `config` - Configuration containing the store endpoint/credentials
/// * `verbose` - Whether to show additional snapshot details
pub fn run(config: &Config, verbose: bool) {
    if let Err(err) = show_status(config, verbose) {
        error!("Status failed: {err}");
        eprintln!("{err}");
    }
}

fn show_status(config: &Config, verbose: bool) -> Result<(), String> {
    let store = HttpRecordStore::from_config(&config.store).map_err(|e| format!("✗ {e}"))?;

    let mut session = Session::new();
    session
        .load_from(&store)
        .map_err(|e| format!("✗ Failed to load records: {e}"))?;
    info!("Loaded {} records from the store", session.history().len());

    let today = Local::now().date_naive();
    let now = Utc::now();
    let history = session.history();
    let stats = compute_stats(history, today, now);
    let calendar = CalendarMonth::build(history, today.year(), today.month())
        .ok_or_else(|| "✗ Could not build the calendar for the current month".to_string())?;

    print_dashboard(&stats, &calendar.label());
    if verbose {
        println!("Days recorded overall: {}", history.len());
    }

    println!();
    print_calendar(&calendar);
    print_today_status(history, today);

    Ok(())
}

/// Print the statistics block
fn print_dashboard(stats: &StreakStats, month_label: &str) {
    println!("\n=== Streak Dashboard — {month_label} ===");
    println!("Current streak: {} days", stats.current_streak);
    println!("Best streak:    {} days", stats.best_streak);
    println!(
        "This month:     {} achieved / {} recorded ({}%)",
        stats.month_success, stats.month_total, stats.success_rate
    );
    match stats.since_last_failure {
        Some(elapsed) => println!("Since last failure: {elapsed}"),
        None => println!("Since last failure: no failure recorded"),
    }
}

/// Print the month as a Sunday-first text grid
fn print_calendar(calendar: &CalendarMonth) {
    println!("  Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    let mut row: Vec<String> = vec!["     ".to_string(); calendar.leading_blanks];
    for cell in &calendar.cells {
        let marker = match cell.outcome {
            Some(true) => '✓',
            Some(false) => '✗',
            None => ' ',
        };
        row.push(format!("{:>4}{marker}", cell.label));

        if row.len() == 7 {
            println!("{}", row.concat());
            row.clear();
        }
    }
    if !row.is_empty() {
        println!("{}", row.concat());
    }
}

/// Print today's line, prompting for registration when unrecorded.
///
/// An unrecorded today and a failed today both mean a zero current streak,
/// but only the former asks the user to register.
fn print_today_status(history: &RecordHistory, today: NaiveDate) {
    match history.get(today) {
        None => {
            println!("\nToday's outcome is not recorded yet.");
            println!("Register it with: streakboard log done   (or: streakboard log missed)");
        }
        Some(record) if record.success => {
            println!("\n✓ Today is recorded as achieved.");
        }
        Some(_) => {
            println!("\n✗ Today is recorded as missed.");
        }
    }
}

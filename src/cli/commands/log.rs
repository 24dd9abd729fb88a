//! Log command handler
//!
//! Registers today's outcome against the store (insert or overwrite, keyed
//! by the local calendar day), then reloads the snapshot and prints the
//! refreshed statistics.

use crate::args::OutcomeArg;
use chrono::{Local, Utc};
use logger::{error, info};
use streakboard::config::Config;
use streakboard::core::models::DailyRecord;
use streakboard::core::session::Session;
use streakboard::core::stats::compute_stats;
use streakboard::core::store::HttpRecordStore;

/// Run the log command.
///
/// # Arguments
/// * `outcome` - Today's outcome as given on the command line
/// * `config` - Configuration containing the store endpoint/credentials
pub fn run(outcome: OutcomeArg, config: &Config) {
    if let Err(err) = register_today(outcome, config) {
        error!("Log failed: {err}");
        eprintln!("{err}");
    }
}

fn register_today(outcome: OutcomeArg, config: &Config) -> Result<(), String> {
    let store = HttpRecordStore::from_config(&config.store).map_err(|e| format!("✗ {e}"))?;

    let mut session = Session::new();
    session
        .load_from(&store)
        .map_err(|e| format!("✗ Failed to load records: {e}"))?;

    let today = Local::now().date_naive();
    let now = Utc::now();

    if let Some(existing) = session.history().get(today) {
        let prior = if existing.success { "achieved" } else { "missed" };
        println!("ℹ Today was already recorded as {prior}; overwriting.");
    }

    let record = DailyRecord::new(today, outcome.is_success(), now);
    session
        .save_to(&store, &record)
        .map_err(|e| format!("✗ Failed to save today's record: {e}"))?;
    info!("Recorded {} for {}", record.success, record.day_key());

    // Reload so the numbers reflect the store's view of the snapshot
    session
        .load_from(&store)
        .map_err(|e| format!("✗ Saved, but failed to reload records: {e}"))?;

    let stats = compute_stats(session.history(), today, now);

    if outcome.is_success() {
        println!("✓ Recorded today as achieved.");
        println!("Current streak: {} days", stats.current_streak);
    } else {
        println!("✗ Recorded today as missed.");
        println!("Best streak so far: {} days", stats.best_streak);
    }
    println!(
        "This month: {} achieved / {} recorded ({}%)",
        stats.month_success, stats.month_total, stats.success_rate
    );

    Ok(())
}

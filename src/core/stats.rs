//! Streak and monthly statistics

use crate::core::models::RecordHistory;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;

/// Milliseconds per whole minute
const MS_PER_MINUTE: i64 = 60_000;
/// Minutes per whole day
const MINUTES_PER_DAY: i64 = 60 * 24;

/// Wall-clock time elapsed since the most recent failure, floored to minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    /// Whole days elapsed
    pub days: i64,
    /// Whole hours elapsed beyond `days`
    pub hours: i64,
    /// Whole minutes elapsed beyond `hours`
    pub minutes: i64,
}

impl Elapsed {
    /// Break a millisecond duration into days/hours/minutes
    ///
    /// Negative input (clock skew between the machine that wrote the record
    /// and this one) clamps to zero.
    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        let total_minutes = if ms > 0 { ms / MS_PER_MINUTE } else { 0 };
        Self {
            days: total_minutes / MINUTES_PER_DAY,
            hours: (total_minutes % MINUTES_PER_DAY) / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl fmt::Display for Elapsed {
    /// Days+hours when at least a day has passed, hours+minutes when at
    /// least an hour, minutes otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d {}h", self.days, self.hours)
        } else if self.hours > 0 {
            write!(f, "{}h {}m", self.hours, self.minutes)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}

/// Computed statistics for a record snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakStats {
    /// Consecutive successful days ending today (0 when today is
    /// unrecorded or a failure)
    pub current_streak: usize,
    /// Longest run of consecutive successful days ever recorded
    pub best_streak: usize,
    /// Successful days in the reference month
    pub month_success: usize,
    /// Recorded days in the reference month
    pub month_total: usize,
    /// `round(100 × month_success / month_total)`, 0 when nothing recorded
    pub success_rate: u32,
    /// Time since the most recent failure was written; `None` when no
    /// failure has ever been recorded
    pub since_last_failure: Option<Elapsed>,
}

/// Compute all statistics for a snapshot.
///
/// `history` must be ascending by day with at most one record per day
/// ([`RecordHistory`] maintains both). `today` fixes the reference day for the
/// current streak and the reference month; `now` fixes the wall clock for the
/// elapsed computation. Both are explicit inputs so results are deterministic.
#[must_use]
pub fn compute_stats(history: &RecordHistory, today: NaiveDate, now: DateTime<Utc>) -> StreakStats {
    let (month_success, month_total) = month_tally(history, today.year(), today.month());

    StreakStats {
        current_streak: current_streak(history, today),
        best_streak: best_streak(history),
        month_success,
        month_total,
        success_rate: success_rate(month_success, month_total),
        since_last_failure: since_last_failure(history, now),
    }
}

/// Count consecutive successful days ending today.
///
/// Today must itself be a success record; the scan then walks backward from
/// the end of the ascending sequence and stops at the first failure or the
/// first pair of neighbouring records more than one calendar day apart.
#[must_use]
pub fn current_streak(history: &RecordHistory, today: NaiveDate) -> usize {
    if !history.get(today).is_some_and(|record| record.success) {
        return 0;
    }

    let records = history.records();
    let mut streak = 0;

    for i in (0..records.len()).rev() {
        if !records[i].success {
            break;
        }
        if i + 1 < records.len() {
            let gap = (records[i + 1].day - records[i].day).num_days();
            if gap != 1 {
                break;
            }
        }
        streak += 1;
    }

    streak
}

/// Longest run of consecutive successful days anywhere in the history.
///
/// A run extends only when the positionally-previous record is a success
/// exactly one day earlier; a failure resets the run to zero, a date gap
/// restarts it at the current record.
#[must_use]
pub fn best_streak(history: &RecordHistory) -> usize {
    let records = history.records();
    let mut best = 0;
    let mut running = 0;

    for i in 0..records.len() {
        let record = &records[i];
        if record.success {
            if i > 0 {
                let prev = &records[i - 1];
                let gap = (record.day - prev.day).num_days();
                if gap != 1 || !prev.success {
                    running = 0;
                }
            } else {
                running = 0;
            }
            running += 1;
            best = best.max(running);
        } else {
            running = 0;
        }
    }

    best
}

/// Count (successes, total) for records falling inside the given month
#[must_use]
pub fn month_tally(history: &RecordHistory, year: i32, month: u32) -> (usize, usize) {
    let in_month = |day: NaiveDate| day.year() == year && day.month() == month;

    let mut success = 0;
    let mut total = 0;
    for record in history.records() {
        if in_month(record.day) {
            total += 1;
            if record.success {
                success += 1;
            }
        }
    }

    (success, total)
}

/// Rounded success percentage, 0 when nothing was recorded
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn success_rate(success: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * success as f64 / total as f64).round() as u32
}

/// Elapsed time since the most recent failure record was written.
///
/// Returns `None` when the history contains no failure. Negative elapsed
/// time clamps to zero inside [`Elapsed::from_millis`].
#[must_use]
pub fn since_last_failure(history: &RecordHistory, now: DateTime<Utc>) -> Option<Elapsed> {
    history
        .records()
        .iter()
        .rev()
        .find(|record| !record.success)
        .map(|failure| {
            let ms = now
                .signed_duration_since(failure.recorded_at)
                .num_milliseconds();
            Elapsed::from_millis(ms)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::DailyRecord;
    use chrono::{Duration, TimeZone};

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date literal")
    }

    fn noon(day: &str) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date(day).and_hms_opt(12, 0, 0).unwrap())
    }

    fn record(day: &str, success: bool) -> DailyRecord {
        DailyRecord::new(date(day), success, noon(day))
    }

    fn history(records: Vec<DailyRecord>) -> RecordHistory {
        RecordHistory::from_records(records)
    }

    #[test]
    fn empty_history_yields_zero_stats() {
        let stats = compute_stats(&RecordHistory::new(), date("2024-05-10"), noon("2024-05-10"));

        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 0);
        assert_eq!(stats.month_success, 0);
        assert_eq!(stats.month_total, 0);
        assert_eq!(stats.success_rate, 0);
        assert!(stats.since_last_failure.is_none());
    }

    #[test]
    fn current_streak_counts_consecutive_successes_ending_today() {
        let h = history(vec![
            record("2024-05-01", true),
            record("2024-05-02", true),
            record("2024-05-03", true),
            record("2024-05-04", true),
        ]);

        assert_eq!(current_streak(&h, date("2024-05-04")), 4);
    }

    #[test]
    fn current_streak_is_zero_without_a_record_for_today() {
        let h = history(vec![record("2024-05-01", true), record("2024-05-02", true)]);

        assert_eq!(current_streak(&h, date("2024-05-03")), 0);
    }

    #[test]
    fn current_streak_is_zero_when_today_is_a_failure() {
        let h = history(vec![record("2024-05-01", true), record("2024-05-02", false)]);

        assert_eq!(current_streak(&h, date("2024-05-02")), 0);
    }

    #[test]
    fn current_streak_stops_at_a_failure() {
        let h = history(vec![
            record("2024-05-01", true),
            record("2024-05-02", false),
            record("2024-05-03", true),
            record("2024-05-04", true),
        ]);

        assert_eq!(current_streak(&h, date("2024-05-04")), 2);
    }

    #[test]
    fn current_streak_stops_at_a_date_gap() {
        let h = history(vec![
            record("2024-05-01", true),
            record("2024-05-02", true),
            record("2024-05-04", true),
        ]);

        // 05-03 is missing, so only 05-04 counts
        assert_eq!(current_streak(&h, date("2024-05-04")), 1);
    }

    #[test]
    fn two_day_gap_does_not_form_a_streak() {
        let h = history(vec![record("2024-05-01", true), record("2024-05-03", true)]);

        assert_eq!(current_streak(&h, date("2024-05-03")), 1);
        assert_eq!(best_streak(&h), 1);
    }

    #[test]
    fn best_streak_finds_longest_run() {
        let h = history(vec![
            record("2024-04-28", true),
            record("2024-04-29", true),
            record("2024-04-30", true),
            record("2024-05-01", false),
            record("2024-05-02", true),
            record("2024-05-03", true),
        ]);

        assert_eq!(best_streak(&h), 3);
    }

    #[test]
    fn best_streak_survives_later_records() {
        let mut records = vec![
            record("2024-04-01", true),
            record("2024-04-02", true),
            record("2024-04-03", true),
            record("2024-04-04", true),
            record("2024-04-05", true),
        ];
        let before = best_streak(&history(records.clone()));
        assert_eq!(before, 5);

        // Appending later records never shrinks the best streak
        records.push(record("2024-04-06", false));
        records.push(record("2024-04-07", true));
        let after = best_streak(&history(records));
        assert_eq!(after, before);
    }

    #[test]
    fn best_streak_is_at_least_current_streak() {
        let h = history(vec![
            record("2024-05-01", true),
            record("2024-05-02", false),
            record("2024-05-03", true),
            record("2024-05-04", true),
            record("2024-05-05", true),
        ]);
        let stats = compute_stats(&h, date("2024-05-05"), noon("2024-05-05"));

        assert!(stats.best_streak >= stats.current_streak);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.best_streak, 3);
    }

    #[test]
    fn month_tally_matches_reference_sample() {
        let h = history(vec![
            record("2024-05-01", true),
            record("2024-05-02", false),
            record("2024-05-03", true),
        ]);
        let stats = compute_stats(&h, date("2024-05-03"), noon("2024-05-03"));

        assert_eq!(stats.month_total, 3);
        assert_eq!(stats.month_success, 2);
        assert_eq!(stats.success_rate, 67);
    }

    #[test]
    fn month_tally_excludes_other_months() {
        let h = history(vec![
            record("2024-04-30", true),
            record("2024-05-01", true),
            record("2024-05-31", false),
            record("2024-06-01", true),
        ]);

        assert_eq!(month_tally(&h, 2024, 5), (1, 2));
    }

    #[test]
    fn re_registering_a_day_is_a_full_overwrite() {
        let mut h = history(vec![record("2024-05-01", true), record("2024-05-02", true)]);
        assert_eq!(current_streak(&h, date("2024-05-02")), 2);

        h.upsert(record("2024-05-02", false));
        let stats = compute_stats(&h, date("2024-05-02"), noon("2024-05-02"));

        assert_eq!(h.records().len(), 2);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.month_success, 1);
        assert_eq!(stats.month_total, 2);
    }

    #[test]
    fn elapsed_ninety_minutes_formats_as_hours_and_minutes() {
        let failure = record("2024-05-01", false);
        let now = failure.recorded_at + Duration::minutes(90);
        let h = history(vec![failure]);

        let elapsed = since_last_failure(&h, now).expect("failure present");
        assert_eq!(elapsed.to_string(), "1h 30m");
    }

    #[test]
    fn elapsed_thirty_minutes_formats_as_minutes_only() {
        let failure = record("2024-05-01", false);
        let now = failure.recorded_at + Duration::minutes(30);
        let h = history(vec![failure]);

        let elapsed = since_last_failure(&h, now).expect("failure present");
        assert_eq!(elapsed.to_string(), "30m");
    }

    #[test]
    fn elapsed_twenty_five_hours_formats_as_days_and_hours() {
        let failure = record("2024-05-01", false);
        let now = failure.recorded_at + Duration::hours(25);
        let h = history(vec![failure]);

        let elapsed = since_last_failure(&h, now).expect("failure present");
        assert_eq!(elapsed.to_string(), "1d 1h");
    }

    #[test]
    fn elapsed_clamps_negative_durations_to_zero() {
        let failure = record("2024-05-02", false);
        // `now` earlier than the write time: clock skew
        let now = failure.recorded_at - Duration::minutes(5);
        let h = history(vec![failure]);

        let elapsed = since_last_failure(&h, now).expect("failure present");
        assert_eq!(
            elapsed,
            Elapsed {
                days: 0,
                hours: 0,
                minutes: 0
            }
        );
        assert_eq!(elapsed.to_string(), "0m");
    }

    #[test]
    fn elapsed_uses_most_recent_failure() {
        let old_failure = record("2024-05-01", false);
        let new_failure = record("2024-05-03", false);
        let now = new_failure.recorded_at + Duration::minutes(10);
        let h = history(vec![old_failure, record("2024-05-02", true), new_failure]);

        let elapsed = since_last_failure(&h, now).expect("failure present");
        assert_eq!(elapsed.to_string(), "10m");
    }

    #[test]
    fn all_success_history_reports_no_failure() {
        let h = history(vec![record("2024-05-01", true), record("2024-05-02", true)]);

        assert!(since_last_failure(&h, noon("2024-05-02")).is_none());
    }
}

//! Daily record model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day's recorded outcome for the tracked goal
///
/// The record is keyed by its calendar day: the hosted store holds at most one
/// row per `day`, and re-registering a day overwrites the prior record. The
/// serialized form matches the store's columns (`day` as a zero-padded
/// `YYYY-MM-DD` key, `recorded_at` as an RFC 3339 timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day the outcome belongs to (the user's local day)
    pub day: NaiveDate,

    /// Whether the goal was achieved that day
    pub success: bool,

    /// When the record was written, not when the day occurred.
    /// Used only for the elapsed-since-last-failure statistic.
    pub recorded_at: DateTime<Utc>,
}

impl DailyRecord {
    /// Create a new record
    #[must_use]
    pub const fn new(day: NaiveDate, success: bool, recorded_at: DateTime<Utc>) -> Self {
        Self {
            day,
            success,
            recorded_at,
        }
    }

    /// Canonical `YYYY-MM-DD` key for this record's day
    #[must_use]
    pub fn day_key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}

//! Record history collection

use super::record::DailyRecord;
use chrono::NaiveDate;

/// An ordered snapshot of daily records
///
/// Maintains the invariants the statistics engine assumes: records are sorted
/// ascending by day and there is at most one record per day. When the same day
/// appears more than once on input, the last write wins, mirroring the hosted
/// store's upsert-by-day semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordHistory {
    records: Vec<DailyRecord>,
}

impl RecordHistory {
    /// Create an empty history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Build a history from a store snapshot
    ///
    /// Sorts ascending by day and collapses duplicate days, keeping the
    /// later entry. The store already returns day-ascending rows; this
    /// re-establishes the contract against a misbehaving backend.
    #[must_use]
    pub fn from_records(mut records: Vec<DailyRecord>) -> Self {
        records.sort_by_key(|record| record.day);

        let mut deduped: Vec<DailyRecord> = Vec::with_capacity(records.len());
        for record in records {
            match deduped.last_mut() {
                Some(last) if last.day == record.day => *last = record,
                _ => deduped.push(record),
            }
        }

        Self { records: deduped }
    }

    /// The records, ascending by day
    #[must_use]
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Look up the record for a specific day
    #[must_use]
    pub fn get(&self, day: NaiveDate) -> Option<&DailyRecord> {
        self.records
            .binary_search_by_key(&day, |record| record.day)
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// Insert or overwrite the record for its day
    pub fn upsert(&mut self, record: DailyRecord) {
        match self
            .records
            .binary_search_by_key(&record.day, |existing| existing.day)
        {
            Ok(idx) => self.records[idx] = record,
            Err(idx) => self.records.insert(idx, record),
        }
    }

    /// Number of recorded days
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no days have been recorded
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

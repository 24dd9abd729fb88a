//! In-memory record store
//!
//! Same upsert-by-day semantics as the hosted store, held in process memory.
//! Used by tests that drive the load/save flow without a network.

use super::{RecordStore, StoreError};
use crate::core::models::{DailyRecord, RecordHistory};
use std::sync::Mutex;

/// Record store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<RecordHistory>,
    failure: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with records
    #[must_use]
    pub fn with_records(records: Vec<DailyRecord>) -> Self {
        Self {
            records: Mutex::new(RecordHistory::from_records(records)),
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent call fail with the given error
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Clear an injected failure
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        self.failure
            .lock()
            .map_or(Ok(()), |failure| match failure.as_ref() {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            })
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> Result<Vec<DailyRecord>, StoreError> {
        self.check_failure()?;
        self.records
            .lock()
            .map(|records| records.records().to_vec())
            .map_err(|_| StoreError::Request("memory store lock poisoned".to_string()))
    }

    fn upsert(&self, record: &DailyRecord) -> Result<(), StoreError> {
        self.check_failure()?;
        self.records
            .lock()
            .map(|mut records| records.upsert(record.clone()))
            .map_err(|_| StoreError::Request("memory store lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(day: &str, success: bool) -> DailyRecord {
        DailyRecord::new(
            day.parse().expect("valid date literal"),
            success,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn list_returns_day_ascending_records() {
        let store = MemoryStore::with_records(vec![
            record("2024-05-03", true),
            record("2024-05-01", false),
        ]);

        let listed = store.list().expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].day_key(), "2024-05-01");
        assert_eq!(listed[1].day_key(), "2024-05-03");
    }

    #[test]
    fn upsert_overwrites_same_day() {
        let store = MemoryStore::new();
        store.upsert(&record("2024-05-01", false)).expect("insert");
        store
            .upsert(&record("2024-05-01", true))
            .expect("overwrite");

        let listed = store.list().expect("list");
        assert_eq!(listed.len(), 1);
        assert!(listed[0].success);
    }

    #[test]
    fn injected_failure_surfaces_and_recovers() {
        let store = MemoryStore::new();
        store.fail_with(StoreError::Request("unreachable".to_string()));

        assert!(store.list().is_err());
        assert!(store.upsert(&record("2024-05-01", true)).is_err());

        store.recover();
        assert!(store.list().is_ok());
    }
}

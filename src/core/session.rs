//! Dashboard session state
//!
//! Replaces ad-hoc loading/error flags with an explicit state container:
//! `Idle → Loading → {Loaded, Failed}` and `Loaded → Saving → {Loaded,
//! Failed}`, each transition driven by a named event. A failure keeps the
//! previously loaded history so callers can keep displaying prior data.

use crate::core::models::{DailyRecord, RecordHistory};
use crate::core::store::{RecordStore, StoreError};

/// Where the session currently is in its load/save cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A snapshot fetch is in flight
    Loading,
    /// A snapshot is available
    Loaded,
    /// A write is in flight
    Saving,
    /// The last load or save failed; any prior snapshot is retained
    Failed,
}

/// Named external events that drive the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user asked for a fresh snapshot
    LoadRequested,
    /// The store returned a snapshot
    LoadSucceeded(RecordHistory),
    /// The store read failed
    LoadFailed(String),
    /// The user asked to write a record
    SaveRequested,
    /// The store accepted the write
    SaveSucceeded,
    /// The store rejected the write
    SaveFailed(String),
}

/// State container for one dashboard session
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: Phase,
    history: RecordHistory,
    error: Option<String>,
}

impl Session {
    /// Create an idle session with no data
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            history: RecordHistory::new(),
            error: None,
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The most recently loaded snapshot (empty until the first load)
    #[must_use]
    pub const fn history(&self) -> &RecordHistory {
        &self.history
    }

    /// The message from the most recent failure, cleared on the next
    /// successful transition
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply an event, moving to the next phase.
    ///
    /// Events that do not apply to the current phase are ignored (e.g.
    /// `SaveRequested` while a load is in flight); the session stays where
    /// it is.
    pub fn apply(&mut self, event: SessionEvent) {
        match (self.phase, event) {
            (Phase::Idle | Phase::Loaded | Phase::Failed, SessionEvent::LoadRequested) => {
                self.phase = Phase::Loading;
                self.error = None;
            }
            (Phase::Loading, SessionEvent::LoadSucceeded(history)) => {
                self.phase = Phase::Loaded;
                self.history = history;
                self.error = None;
            }
            (Phase::Loading, SessionEvent::LoadFailed(message)) => {
                self.phase = Phase::Failed;
                self.error = Some(message);
            }
            (Phase::Loaded | Phase::Failed, SessionEvent::SaveRequested) => {
                self.phase = Phase::Saving;
                self.error = None;
            }
            (Phase::Saving, SessionEvent::SaveSucceeded) => {
                self.phase = Phase::Loaded;
                self.error = None;
            }
            (Phase::Saving, SessionEvent::SaveFailed(message)) => {
                self.phase = Phase::Failed;
                self.error = Some(message);
            }
            _ => {}
        }
    }

    /// Fetch a fresh snapshot from the store, driving the load transitions.
    ///
    /// # Errors
    /// Returns the store error after recording it; the prior snapshot is
    /// retained for display.
    pub fn load_from(&mut self, store: &dyn RecordStore) -> Result<(), StoreError> {
        self.apply(SessionEvent::LoadRequested);
        match store.list() {
            Ok(records) => {
                self.apply(SessionEvent::LoadSucceeded(RecordHistory::from_records(
                    records,
                )));
                Ok(())
            }
            Err(error) => {
                self.apply(SessionEvent::LoadFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Write one record to the store, driving the save transitions.
    ///
    /// The in-memory snapshot is not patched on success; callers reload to
    /// pick up the store's view, as the write may race another device.
    ///
    /// # Errors
    /// Returns the store error after recording it.
    pub fn save_to(
        &mut self,
        store: &dyn RecordStore,
        record: &DailyRecord,
    ) -> Result<(), StoreError> {
        self.apply(SessionEvent::SaveRequested);
        match store.upsert(record) {
            Ok(()) => {
                self.apply(SessionEvent::SaveSucceeded);
                Ok(())
            }
            Err(error) => {
                self.apply(SessionEvent::SaveFailed(error.to_string()));
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::DailyRecord;
    use chrono::{TimeZone, Utc};

    fn snapshot() -> RecordHistory {
        RecordHistory::from_records(vec![DailyRecord::new(
            "2024-05-01".parse().unwrap(),
            true,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )])
    }

    #[test]
    fn load_cycle_reaches_loaded() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);

        session.apply(SessionEvent::LoadRequested);
        assert_eq!(session.phase(), Phase::Loading);

        session.apply(SessionEvent::LoadSucceeded(snapshot()));
        assert_eq!(session.phase(), Phase::Loaded);
        assert_eq!(session.history().len(), 1);
        assert!(session.error().is_none());
    }

    #[test]
    fn load_failure_keeps_prior_snapshot() {
        let mut session = Session::new();
        session.apply(SessionEvent::LoadRequested);
        session.apply(SessionEvent::LoadSucceeded(snapshot()));

        session.apply(SessionEvent::LoadRequested);
        session.apply(SessionEvent::LoadFailed("connection refused".to_string()));

        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(session.history().len(), 1, "prior data remains displayed");
        assert_eq!(session.error(), Some("connection refused"));
    }

    #[test]
    fn save_cycle_returns_to_loaded() {
        let mut session = Session::new();
        session.apply(SessionEvent::LoadRequested);
        session.apply(SessionEvent::LoadSucceeded(snapshot()));

        session.apply(SessionEvent::SaveRequested);
        assert_eq!(session.phase(), Phase::Saving);

        session.apply(SessionEvent::SaveSucceeded);
        assert_eq!(session.phase(), Phase::Loaded);
    }

    #[test]
    fn save_failure_records_message() {
        let mut session = Session::new();
        session.apply(SessionEvent::LoadRequested);
        session.apply(SessionEvent::LoadSucceeded(snapshot()));

        session.apply(SessionEvent::SaveRequested);
        session.apply(SessionEvent::SaveFailed("duplicate key".to_string()));

        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(session.error(), Some("duplicate key"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn retry_after_failure_is_allowed() {
        let mut session = Session::new();
        session.apply(SessionEvent::LoadRequested);
        session.apply(SessionEvent::LoadFailed("timeout".to_string()));
        assert_eq!(session.phase(), Phase::Failed);

        session.apply(SessionEvent::LoadRequested);
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.error().is_none());
    }

    #[test]
    fn load_and_save_drive_a_memory_store() {
        use crate::core::store::MemoryStore;

        let store = MemoryStore::new();
        let mut session = Session::new();

        session.load_from(&store).expect("initial load");
        assert_eq!(session.phase(), Phase::Loaded);
        assert!(session.history().is_empty());

        let record = DailyRecord::new(
            "2024-05-02".parse().unwrap(),
            true,
            Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
        );
        session.save_to(&store, &record).expect("save");
        assert_eq!(session.phase(), Phase::Loaded);

        session.load_from(&store).expect("reload");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn failed_load_records_error_and_returns_it() {
        use crate::core::store::{MemoryStore, StoreError};

        let store = MemoryStore::new();
        store.fail_with(StoreError::Request("unreachable".to_string()));

        let mut session = Session::new();
        assert!(session.load_from(&store).is_err());
        assert_eq!(session.phase(), Phase::Failed);
        assert!(session.error().is_some_and(|e| e.contains("unreachable")));
    }

    #[test]
    fn inapplicable_events_are_ignored() {
        let mut session = Session::new();

        // No load in flight: results have nothing to apply to
        session.apply(SessionEvent::LoadSucceeded(snapshot()));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.history().is_empty());

        session.apply(SessionEvent::LoadRequested);
        session.apply(SessionEvent::SaveRequested);
        assert_eq!(session.phase(), Phase::Loading);
    }
}

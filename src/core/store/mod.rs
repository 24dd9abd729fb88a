//! Record store boundary
//!
//! The hosted relational store owns persistence; this module defines the
//! contract the rest of the crate consumes and the error taxonomy surfaced
//! to the user. Conflict resolution is entirely the store's: `upsert`
//! conflicts on the day key and the last write wins.

pub mod http;
pub mod memory;

use crate::core::models::DailyRecord;

pub use http::HttpRecordStore;
pub use memory::MemoryStore;

/// Errors surfaced by a record store
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Store url or key missing; no network attempt was made
    #[error("record store is not configured: set store.url and store.key (or STREAKBOARD_STORE_URL / STREAKBOARD_STORE_KEY)")]
    NotConfigured,

    /// Transport-level failure (connect, timeout)
    #[error("store request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status
    #[error("store returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, passed through verbatim for display
        message: String,
    },

    /// The response body did not decode as daily records
    #[error("unexpected store payload: {0}")]
    Payload(String),
}

/// Contract for a keyed-by-day record store
pub trait RecordStore {
    /// Fetch every record, ascending by day.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the store cannot be reached, rejects the
    /// query, or answers with an undecodable payload.
    fn list(&self) -> Result<Vec<DailyRecord>, StoreError>;

    /// Insert or overwrite the record for its day.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the store cannot be reached or rejects
    /// the write.
    fn upsert(&self, record: &DailyRecord) -> Result<(), StoreError>;
}

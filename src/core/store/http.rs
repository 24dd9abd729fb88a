//! Hosted record store client
//!
//! Talks to a PostgREST-style REST endpoint (the kind hosted relational
//! backends expose): `GET /rest/v1/<table>` for the snapshot,
//! `POST /rest/v1/<table>?on_conflict=day` for the day-keyed upsert.

use super::{RecordStore, StoreError};
use crate::core::config::StoreConfig;
use crate::core::models::DailyRecord;
use std::time::Duration;

/// Request timeout for store calls
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Blocking HTTP client for the hosted record store
pub struct HttpRecordStore {
    url: String,
    key: String,
    table: String,
    client: reqwest::blocking::Client,
}

impl HttpRecordStore {
    /// Build a client from the store configuration.
    ///
    /// # Errors
    /// Returns [`StoreError::NotConfigured`] when the url or key is empty
    /// (no network attempt is made), or [`StoreError::Request`] when the
    /// underlying HTTP client cannot be constructed.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.url.is_empty() || config.key.is_empty() {
            return Err(StoreError::NotConfigured);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            table: config.table.clone(),
            client,
        })
    }

    /// REST endpoint for the record table
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Map a transport error, keeping timeouts recognizable
    fn request_error(e: &reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Request(format!(
                "request timed out after {REQUEST_TIMEOUT_SECS} seconds"
            ))
        } else {
            StoreError::Request(e.to_string())
        }
    }

    /// Turn a non-success response into an API error carrying the body
    fn api_error(response: reqwest::blocking::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "(unreadable response body)".to_string());
        StoreError::Api { status, message }
    }
}

impl RecordStore for HttpRecordStore {
    fn list(&self) -> Result<Vec<DailyRecord>, StoreError> {
        let url = format!(
            "{}?select=day,success,recorded_at&order=day.asc",
            self.table_url()
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .map_err(|e| Self::request_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response));
        }

        response
            .json::<Vec<DailyRecord>>()
            .map_err(|e| StoreError::Payload(e.to_string()))
    }

    fn upsert(&self, record: &DailyRecord) -> Result<(), StoreError> {
        let url = format!("{}?on_conflict=day", self.table_url());

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record)
            .send()
            .map_err(|e| Self::request_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: &str) -> StoreConfig {
        StoreConfig {
            url: url.to_string(),
            key: key.to_string(),
            table: "habit_days".to_string(),
        }
    }

    #[test]
    fn missing_url_is_not_configured() {
        let err = HttpRecordStore::from_config(&config("", "anon-key"))
            .err()
            .expect("must fail");
        assert!(matches!(err, StoreError::NotConfigured));
    }

    #[test]
    fn missing_key_is_not_configured() {
        let err = HttpRecordStore::from_config(&config("https://db.example.com", ""))
            .err()
            .expect("must fail");
        assert!(matches!(err, StoreError::NotConfigured));
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        let store = HttpRecordStore::from_config(&config("https://db.example.com/", "anon-key"))
            .expect("configured");
        assert_eq!(store.table_url(), "https://db.example.com/rest/v1/habit_days");
    }
}

//! Backend readings
//!
//! Wire types for the `/api/ultimo` and `/api/historico` endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used by the backend
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sentinel `status` value returned by `/api/ultimo` when nothing is stored yet
pub const NO_DATA_STATUS: &str = "sin_datos";

/// A single eco-score reading as produced by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub ecoscore: f64,
    pub timestamp: String,
}

impl Reading {
    /// Create a reading without a backend id
    pub fn new(ecoscore: f64, timestamp: impl Into<String>) -> Self {
        Self {
            id: None,
            ecoscore,
            timestamp: timestamp.into(),
        }
    }

    /// Parse the timestamp, `None` when it is not in the backend format
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Result of `/api/ultimo`
#[derive(Debug, Clone, PartialEq)]
pub enum Latest {
    /// The backend has no readings yet
    NoData,
    Reading(Reading),
}

/// Raw `/api/ultimo` body before the status sentinel is checked
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LatestResponse {
    Reading(Reading),
    Status { status: String },
}

impl TryFrom<LatestResponse> for Latest {
    type Error = String;

    fn try_from(response: LatestResponse) -> Result<Self, Self::Error> {
        match response {
            LatestResponse::Reading(reading) => Ok(Latest::Reading(reading)),
            LatestResponse::Status { status } if status == NO_DATA_STATUS => Ok(Latest::NoData),
            LatestResponse::Status { status } => Err(status),
        }
    }
}

/// `/api/historico` body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HistoryResponse {
    pub historico: Vec<Reading>,
}

/// A window of readings in the order the backend delivered them (newest first)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryWindow {
    newest_first: Vec<Reading>,
}

impl HistoryWindow {
    pub fn from_newest_first(newest_first: Vec<Reading>) -> Self {
        Self { newest_first }
    }

    pub fn len(&self) -> usize {
        self.newest_first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.newest_first.is_empty()
    }

    /// Readings oldest first, ready for charting
    pub fn chronological(self) -> Vec<Reading> {
        let mut readings = self.newest_first;
        readings.reverse();
        readings
    }
}

impl From<HistoryResponse> for HistoryWindow {
    fn from(response: HistoryResponse) -> Self {
        Self::from_newest_first(response.historico)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_latest_reading() {
        let body = r#"{"id": 7, "ecoscore": 312.456, "timestamp": "2024-05-01 10:00:00"}"#;
        let response: LatestResponse = serde_json::from_str(body).unwrap();
        let latest = Latest::try_from(response).unwrap();

        match latest {
            Latest::Reading(r) => {
                assert_eq!(r.id, Some(7));
                assert_eq!(r.ecoscore, 312.456);
                assert_eq!(r.timestamp, "2024-05-01 10:00:00");
            }
            Latest::NoData => panic!("expected a reading"),
        }
    }

    #[test]
    fn test_decode_latest_no_data() {
        let response: LatestResponse = serde_json::from_str(r#"{"status": "sin_datos"}"#).unwrap();
        assert_eq!(Latest::try_from(response).unwrap(), Latest::NoData);
    }

    #[test]
    fn test_decode_latest_unknown_status() {
        let response: LatestResponse = serde_json::from_str(r#"{"status": "mantenimiento"}"#).unwrap();
        assert_eq!(Latest::try_from(response), Err("mantenimiento".to_string()));
    }

    #[test]
    fn test_history_is_reversed_to_chronological() {
        let body = r#"{"historico": [
            {"id": 3, "ecoscore": 300.0, "timestamp": "2024-05-01 10:02:00"},
            {"id": 2, "ecoscore": 200.0, "timestamp": "2024-05-01 10:01:00"},
            {"id": 1, "ecoscore": 100.0, "timestamp": "2024-05-01 10:00:00"}
        ]}"#;
        let response: HistoryResponse = serde_json::from_str(body).unwrap();
        let window = HistoryWindow::from(response);
        assert_eq!(window.len(), 3);

        let scores: Vec<f64> = window.chronological().iter().map(|r| r.ecoscore).collect();
        assert_eq!(scores, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_missing_historico_is_an_error() {
        assert!(serde_json::from_str::<HistoryResponse>("{}").is_err());
        assert!(serde_json::from_str::<HistoryResponse>(r#"{"error":"db down"}"#).is_err());

        let response: HistoryResponse = serde_json::from_str(r#"{"historico":[]}"#).unwrap();
        assert!(HistoryWindow::from(response).is_empty());
    }

    #[test]
    fn test_parsed_timestamp() {
        let reading = Reading::new(250.0, "2024-05-01 10:30:15");
        let ts = reading.parsed_timestamp().unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "10:30");

        assert!(Reading::new(250.0, "yesterday").parsed_timestamp().is_none());
    }
}

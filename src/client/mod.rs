//! EcoWatcher Backend Client
//!
//! The dashboard talks to the backend through [`EcoApi`] so the same poller
//! and chart renderer run over reqwest on the CLI and over `fetch` in the
//! browser. Everything is single-threaded, hence `?Send`.

#[cfg(feature = "native")]
pub mod http;

#[cfg(feature = "native")]
pub use http::{HttpEcoClient, HttpEcoClientConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{HistoryWindow, Latest};

/// Path of the latest-reading endpoint, relative to the base URL
pub const LATEST_PATH: &str = "/api/ultimo";
/// Path of the history endpoint, relative to the base URL
pub const HISTORY_PATH: &str = "/api/historico";

/// Read access to the EcoWatcher backend
#[async_trait(?Send)]
pub trait EcoApi {
    /// `GET /api/ultimo`
    async fn latest(&self) -> Result<Latest, ClientError>;

    /// `GET /api/historico?limit=N`, newest first as delivered
    async fn history(&self, limit: usize) -> Result<HistoryWindow, ClientError>;
}

/// Build the history URL for a base URL (trailing slash tolerated)
pub fn history_url(base_url: &str, limit: usize) -> String {
    format!("{}{}?limit={}", base_url.trim_end_matches('/'), HISTORY_PATH, limit)
}

/// Build the latest-reading URL for a base URL (trailing slash tolerated)
pub fn latest_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), LATEST_PATH)
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Unexpected status in response: {0}")]
    UnexpectedStatus(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

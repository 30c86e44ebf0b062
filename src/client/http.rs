//! Native HTTP client
//!
//! reqwest implementation of [`EcoApi`] used by the CLI.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::{history_url, latest_url, ClientError, EcoApi};
use crate::model::{HistoryResponse, HistoryWindow, Latest, LatestResponse};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpEcoClientConfig {
    /// Backend base URL (e.g. "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpEcoClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed EcoWatcher client
pub struct HttpEcoClient {
    client: Client,
    config: HttpEcoClientConfig,
}

impl HttpEcoClient {
    /// Create a client; fails only if the TLS backend cannot be initialised
    pub fn new(config: HttpEcoClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpEcoClientConfig {
        &self.config
    }

    async fn get(&self, url: &str) -> Result<Response, ClientError> {
        tracing::debug!(%url, "GET");

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::ApiError {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait(?Send)]
impl EcoApi for HttpEcoClient {
    async fn latest(&self) -> Result<Latest, ClientError> {
        let response = self.get(&latest_url(&self.config.base_url)).await?;
        let body: LatestResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Latest::try_from(body).map_err(ClientError::UnexpectedStatus)
    }

    async fn history(&self, limit: usize) -> Result<HistoryWindow, ClientError> {
        let response = self.get(&history_url(&self.config.base_url, limit)).await?;
        let body: HistoryResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(body.into())
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Network(e.to_string())
    }
}

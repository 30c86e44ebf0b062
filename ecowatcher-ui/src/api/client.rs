//! HTTP API Client
//!
//! gloo-net implementation of the EcoWatcher backend interface.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use ecowatcher::client::{history_url, latest_url, ClientError, EcoApi};
use ecowatcher::model::{HistoryResponse, HistoryWindow, Latest, LatestResponse};

/// Local storage key holding an alternative backend URL
pub const API_URL_KEY: &str = "ecowatcher_api_url";

/// Default API base URL: the origin that served the page
pub const DEFAULT_API_BASE: &str = "";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Browser client for `/api/ultimo` and `/api/historico`
#[derive(Debug, Clone)]
pub struct GlooEcoClient {
    base_url: String,
}

impl GlooEcoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(&base_url.into()),
        }
    }

    /// Client for the URL configured in local storage
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl EcoApi for GlooEcoClient {
    async fn latest(&self) -> Result<Latest, ClientError> {
        let body: LatestResponse = self.get_json(&latest_url(&self.base_url)).await?;
        Latest::try_from(body).map_err(ClientError::UnexpectedStatus)
    }

    async fn history(&self, limit: usize) -> Result<HistoryWindow, ClientError> {
        let body: HistoryResponse = self.get_json(&history_url(&self.base_url, limit)).await?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://eco.local:5000/"), "http://eco.local:5000");
        assert_eq!(normalize_base("  "), "");
        assert_eq!(normalize_base(DEFAULT_API_BASE), "");
    }

    #[test]
    fn test_same_origin_urls() {
        let client = GlooEcoClient::new(DEFAULT_API_BASE);
        assert_eq!(latest_url(&client.base_url), "/api/ultimo");
        assert_eq!(history_url(&client.base_url, 2), "/api/historico?limit=2");
    }
}

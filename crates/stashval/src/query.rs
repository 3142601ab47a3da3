use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use stashval_engine::EngineError;
use stashval_models::{AccountId, QueryResponse};

/// Client side of the identity query endpoint.
#[async_trait]
pub trait InventoryQuery: Send + Sync {
    async fn get_inventory(&self, account_id: &AccountId) -> Result<QueryResponse, EngineError>;
}

/// Reqwest-backed query client with a bounded timeout. One attempt,
/// no retries; timeouts are plain network errors.
pub struct HttpQueryClient {
    client: Client,
    base_url: String,
}

impl HttpQueryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InventoryQuery for HttpQueryClient {
    async fn get_inventory(&self, account_id: &AccountId) -> Result<QueryResponse, EngineError> {
        let url = format!("{}/get_data", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("steam_id", account_id.as_str())])
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;
        serde_json::from_slice(&body)
            .map_err(|e| EngineError::UpstreamFormat(format!("invalid query response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpQueryClient::new("http://server:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://server:8000");
    }
}

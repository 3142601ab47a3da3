//! Reqwest-backed transports for the profile lookup and the pricing API.
//!
//! These own transport details only: request construction, the fixed
//! timeout, and JSON decoding. Timeouts are not distinguished from other
//! transport failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use stashval_models::{AccountId, UpstreamConfig};

use crate::error::EngineError;
use crate::resolver::ProfileSource;
use crate::upstream::PricingApi;

/// Fetches profile documents with a bounded GET. One attempt, no retries.
pub struct HttpProfileSource {
    client: Client,
}

impl HttpProfileSource {
    pub fn new(timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_document(&self, url: &str) -> Result<String, EngineError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        response.text().await.map_err(map_transport_error)
    }
}

/// The pricing provider's two read-only endpoints, scoped by the fixed
/// catalog id and the configured provider-name filter.
pub struct HttpPricingApi {
    client: Client,
    base_url: String,
    provider: String,
    app_id: u32,
}

impl HttpPricingApi {
    pub fn new(config: &UpstreamConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| EngineError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            provider: config.provider.clone(),
            app_id: config.app_id,
        })
    }
}

#[async_trait]
impl PricingApi for HttpPricingApi {
    async fn validate_profile(
        &self,
        account_id: &AccountId,
    ) -> Result<serde_json::Value, EngineError> {
        let url = format!("{}/v3/inventory/public", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", account_id.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_json(response).await
    }

    async fn list_priced_items(
        &self,
        steam64_id: &str,
        vts_millis: i64,
    ) -> Result<serde_json::Value, EngineError> {
        let url = format!("{}/v3/inventory/public/items", self.base_url);
        let force = force_param(vts_millis);
        let app_id = self.app_id.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", steam64_id),
                ("provider", self.provider.as_str()),
                ("force", force.as_str()),
                ("appId", app_id.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_json(response).await
    }
}

/// Freshness-defeating query value: the trusted flag plus the current
/// wall-clock milliseconds, so the upstream cache is bypassed on every
/// stage-2 call. Sent URL-encoded.
fn force_param(vts_millis: i64) -> String {
    format!(r#"{{"isTrusted":true,"_vts":{vts_millis}}}"#)
}

fn map_transport_error(error: reqwest::Error) -> EngineError {
    EngineError::Network(error.to_string())
}

async fn decode_json(response: reqwest::Response) -> Result<serde_json::Value, EngineError> {
    let body = response.bytes().await.map_err(map_transport_error)?;
    serde_json::from_slice(&body)
        .map_err(|e| EngineError::UpstreamFormat(format!("invalid JSON payload: {e}")))
}

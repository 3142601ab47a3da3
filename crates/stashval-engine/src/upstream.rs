use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use stashval_models::AccountId;

use crate::error::EngineError;

/// Transport for the two upstream pricing-provider calls.
#[async_trait]
pub trait PricingApi: Send + Sync {
    /// Stage 1: validate the profile for an account id against the
    /// provider's catalog.
    async fn validate_profile(
        &self,
        account_id: &AccountId,
    ) -> Result<serde_json::Value, EngineError>;

    /// Stage 2: the priced-item listing for a resolved identity.
    /// `vts_millis` defeats the upstream cache.
    async fn list_priced_items(
        &self,
        steam64_id: &str,
        vts_millis: i64,
    ) -> Result<serde_json::Value, EngineError>;
}

/// A source of fresh inventory payloads for an account.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch(&self, account_id: &AccountId) -> Result<serde_json::Value, EngineError>;
}

/// Two-stage upstream client: profile validation, then the priced-item
/// listing. A stage-1 failure short-circuits without touching stage 2.
/// Has no knowledge of caching.
pub struct UpstreamInventoryClient {
    api: Arc<dyn PricingApi>,
}

impl UpstreamInventoryClient {
    pub fn new(api: Arc<dyn PricingApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InventorySource for UpstreamInventoryClient {
    async fn fetch(&self, account_id: &AccountId) -> Result<serde_json::Value, EngineError> {
        let profile = self.api.validate_profile(account_id).await?;
        let steam64_id = steam64_field(&profile)?;
        let payload = self
            .api
            .list_priced_items(&steam64_id, Utc::now().timestamp_millis())
            .await?;
        debug!(account_id = %account_id, "Fetched fresh inventory payload");
        Ok(payload)
    }
}

/// The stage-1 response must carry the resolved 64-bit id, as a string
/// or a bare number.
fn steam64_field(profile: &serde_json::Value) -> Result<String, EngineError> {
    match profile.get("steam64Id") {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => Err(EngineError::UpstreamFormat(
            "profile response is missing steam64Id".to_string(),
        )),
    }
}

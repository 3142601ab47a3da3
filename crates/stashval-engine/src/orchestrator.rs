use std::sync::Arc;

use tracing::info;

use stashval_cache::TtlStore;
use stashval_models::AccountId;

use crate::error::EngineError;
use crate::upstream::InventorySource;

/// Serves "payload plus staleness age" for an account, backed by the TTL
/// store and the upstream source.
///
/// At most one upstream round trip happens per cache miss; concurrent
/// misses for the same key each fetch independently and the store's
/// last-write-wins semantics decide the final entry.
pub struct FetchOrchestrator {
    store: Arc<dyn TtlStore>,
    source: Arc<dyn InventorySource>,
    ttl_seconds: u64,
}

impl FetchOrchestrator {
    pub fn new(store: Arc<dyn TtlStore>, source: Arc<dyn InventorySource>, ttl_seconds: u64) -> Self {
        Self {
            store,
            source,
            ttl_seconds,
        }
    }

    /// Returns the inventory payload and how many seconds ago it was
    /// stored (0 for a fresh fetch).
    pub async fn fetch_inventory(
        &self,
        account_id: &AccountId,
    ) -> Result<(serde_json::Value, u64), EngineError> {
        if let Some(raw) = self.store.get(account_id.as_str()).await? {
            let payload: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
                EngineError::UpstreamFormat(format!("cached payload is not valid JSON: {e}"))
            })?;
            let remaining = self
                .store
                .remaining_ttl(account_id.as_str())
                .await?
                .unwrap_or(0);
            let age_seconds = self.ttl_seconds.saturating_sub(remaining);
            info!(account_id = %account_id, age_seconds, "Serving cached inventory");
            return Ok((payload, age_seconds));
        }

        info!(account_id = %account_id, "Cache miss, fetching upstream");
        let payload = self.source.fetch(account_id).await?;
        self.store
            .set_with_ttl(account_id.as_str(), &payload.to_string(), self.ttl_seconds)
            .await?;
        Ok((payload, 0))
    }
}

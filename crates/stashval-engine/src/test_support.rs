//! Test support: collaborator doubles with call counters.
//!
//! Used by the unit tests here and by downstream crates' integration
//! tests to exercise the pipeline without a network or a Redis instance.

use std::sync::Mutex;

use async_trait::async_trait;

use stashval_cache::{CacheError, TtlStore};
use stashval_models::AccountId;

use crate::error::EngineError;
use crate::resolver::ProfileSource;
use crate::upstream::{InventorySource, PricingApi};

/// `TtlStore` double returning canned values and recording writes.
pub struct StubStore {
    value: Option<String>,
    remaining: Option<u64>,
    writes: Mutex<Vec<(String, String, u64)>>,
}

impl StubStore {
    /// A store that always hits with `value` and the given remaining TTL.
    pub fn hit(value: &str, remaining_ttl: u64) -> Self {
        Self {
            value: Some(value.to_string()),
            remaining: Some(remaining_ttl),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// A store that always misses.
    pub fn miss() -> Self {
        Self {
            value: None,
            remaining: None,
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Recorded `(key, value, ttl_seconds)` writes, in order.
    pub fn writes(&self) -> Vec<(String, String, u64)> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TtlStore for StubStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.value.clone())
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((key.to_string(), value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn remaining_ttl(&self, _key: &str) -> Result<Option<u64>, CacheError> {
        Ok(self.remaining)
    }
}

/// `InventorySource` double with a fetch counter.
pub struct MockInventorySource {
    payload: serde_json::Value,
    failure: Option<String>,
    fetch_count: Mutex<usize>,
}

impl MockInventorySource {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            failure: None,
            fetch_count: Mutex::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            payload: serde_json::Value::Null,
            failure: Some(message.to_string()),
            fetch_count: Mutex::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl InventorySource for MockInventorySource {
    async fn fetch(&self, _account_id: &AccountId) -> Result<serde_json::Value, EngineError> {
        *self.fetch_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        match &self.failure {
            Some(message) => Err(EngineError::Network(message.clone())),
            None => Ok(self.payload.clone()),
        }
    }
}

/// `PricingApi` double with per-stage call counters.
pub struct MockPricingApi {
    profile: Option<serde_json::Value>,
    payload: Option<serde_json::Value>,
    stage1_calls: Mutex<usize>,
    stage2_calls: Mutex<usize>,
}

impl MockPricingApi {
    /// Both stages succeed with the given stage-1 profile and stage-2 payload.
    pub fn new(profile: serde_json::Value, payload: serde_json::Value) -> Self {
        Self {
            profile: Some(profile),
            payload: Some(payload),
            stage1_calls: Mutex::new(0),
            stage2_calls: Mutex::new(0),
        }
    }

    /// Both stages succeed; the stage-1 profile carries `steam64_id`.
    pub fn ok(steam64_id: &str, payload: serde_json::Value) -> Self {
        Self::new(serde_json::json!({ "steam64Id": steam64_id }), payload)
    }

    /// Stage 1 fails with a network error.
    pub fn stage1_failing() -> Self {
        Self {
            profile: None,
            payload: None,
            stage1_calls: Mutex::new(0),
            stage2_calls: Mutex::new(0),
        }
    }

    /// Stage 1 succeeds, stage 2 fails with a network error.
    pub fn stage2_failing(steam64_id: &str) -> Self {
        Self {
            profile: Some(serde_json::json!({ "steam64Id": steam64_id })),
            payload: None,
            stage1_calls: Mutex::new(0),
            stage2_calls: Mutex::new(0),
        }
    }

    pub fn stage1_calls(&self) -> usize {
        *self.stage1_calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn stage2_calls(&self) -> usize {
        *self.stage2_calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PricingApi for MockPricingApi {
    async fn validate_profile(
        &self,
        _account_id: &AccountId,
    ) -> Result<serde_json::Value, EngineError> {
        *self.stage1_calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        match &self.profile {
            Some(profile) => Ok(profile.clone()),
            None => Err(EngineError::Network("mock stage-1 failure".to_string())),
        }
    }

    async fn list_priced_items(
        &self,
        _steam64_id: &str,
        _vts_millis: i64,
    ) -> Result<serde_json::Value, EngineError> {
        *self.stage2_calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        match &self.payload {
            Some(payload) => Ok(payload.clone()),
            None => Err(EngineError::Network("mock stage-2 failure".to_string())),
        }
    }
}

/// `ProfileSource` double serving a fixed document.
pub struct StaticProfileSource {
    document: String,
}

impl StaticProfileSource {
    pub fn new(document: &str) -> Self {
        Self {
            document: document.to_string(),
        }
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn fetch_document(&self, _url: &str) -> Result<String, EngineError> {
        Ok(self.document.clone())
    }
}

/// `ProfileSource` double that always fails with a network error.
pub struct FailingProfileSource;

#[async_trait]
impl ProfileSource for FailingProfileSource {
    async fn fetch_document(&self, _url: &str) -> Result<String, EngineError> {
        Err(EngineError::Network("mock profile lookup failure".to_string()))
    }
}

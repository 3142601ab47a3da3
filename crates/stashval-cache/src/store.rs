use async_trait::async_trait;

use crate::error::CacheError;

/// Key/value store with per-key expiry. Keys are account-id strings,
/// values serialized JSON payloads.
///
/// Entries are never updated in place: a re-fetch inserts a fresh entry
/// with a fresh TTL, and the store's own expiry clock destroys it.
/// `remaining_ttl` is what callers derive staleness age from.
#[async_trait]
pub trait TtlStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError>;

    /// Seconds until the entry expires, or `None` when the key is absent.
    async fn remaining_ttl(&self, key: &str) -> Result<Option<u64>, CacheError>;
}

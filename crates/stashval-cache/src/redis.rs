use async_trait::async_trait;
use bb8_redis::{bb8, redis::AsyncCommands, RedisConnectionManager};
use tracing::debug;

use crate::error::CacheError;
use crate::store::TtlStore;

/// Redis-backed `TtlStore` over a bb8 connection pool.
///
/// `set_with_ttl` maps to SETEX and `remaining_ttl` to TTL, so the
/// staleness clock lives entirely in Redis.
pub struct RedisTtlStore {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisTtlStore {
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let manager = RedisConnectionManager::new(url)?;
        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .map_err(|e| CacheError::Unavailable(format!("failed to build pool: {e}")))?;
        debug!(url, "Connected to Redis");
        Ok(Self { pool })
    }

    async fn conn(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl TtlStore for RedisTtlStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<u64>, CacheError> {
        let mut conn = self.conn().await?;
        // TTL returns -2 for a missing key and -1 for a key without expiry.
        let ttl: i64 = conn.ttl(key).await?;
        if ttl < 0 {
            Ok(None)
        } else {
            Ok(Some(ttl as u64))
        }
    }
}

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::CacheError;
use crate::store::TtlStore;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory `TtlStore` with Redis-equivalent expiry semantics.
///
/// Used by tests and single-process runs. Expired entries are pruned
/// lazily on access. `remaining_ttl` rounds up to whole seconds, matching
/// the Redis `TTL` command.
#[derive(Default)]
pub struct InMemoryTtlStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryTtlStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Entry>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::Unavailable(format!("store mutex poisoned: {e}")))
    }
}

#[async_trait]
impl TtlStore for InMemoryTtlStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        let mut entries = self.lock()?;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<u64>, CacheError> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) => {
                let remaining = entry.expires_at.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    entries.remove(key);
                    Ok(None)
                } else {
                    Ok(Some(remaining.as_secs_f64().ceil() as u64))
                }
            }
            None => Ok(None),
        }
    }
}

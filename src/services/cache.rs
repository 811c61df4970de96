//! In-memory response cache with lazy TTL expiry.
//!
//! Entries are never swept in the background: an expired entry is removed by
//! the `get` that finds it. The key space is tiny (one latest key plus one per
//! requested sol), so there is no size bound.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Default time-to-live for cached responses (15 minutes).
pub const DEFAULT_CACHE_TTL_SECS: i64 = 15 * 60;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: DateTime<Utc>,
}

impl CacheEntry {
    // Wall-clock age: a clock stepped backwards keeps entries alive past the TTL.
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.stored_at > ttl
    }
}

/// Key → JSON document cache shared by all handlers.
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_CACHE_TTL_SECS))
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live entry, removing it if it has outlived the TTL.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Utc::now()).await
    }

    /// Insert or overwrite `key`, stamped with the current time.
    pub async fn set(&self, key: impl Into<String>, value: Value) {
        self.set_at(key, value, Utc::now()).await
    }

    /// When the live entry for `key` was stored.
    #[cfg(test)]
    pub async fn stored_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| !e.is_expired(now, self.ttl))
            .map(|e| e.stored_at)
    }

    /// Number of stored entries, expired ones included until they are read.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub(crate) async fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now, self.ttl) => {
                    return Some(entry.value.clone())
                }
                Some(_) => {}
            }
        }

        // Re-check under the write lock: another request may have refreshed
        // the entry between dropping the read lock and taking this one.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_expired(now, self.ttl) {
                tracing::debug!("Cache entry '{}' expired, evicting", key);
                entries.remove(key);
            } else {
                return Some(entry.value.clone());
            }
        }
        None
    }

    pub(crate) async fn set_at(&self, key: impl Into<String>, value: Value, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }
}

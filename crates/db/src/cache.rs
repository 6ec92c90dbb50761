//! Short-lived memo of query results.
//!
//! Entries are keyed by query text plus bound parameters and expire after a
//! fixed time-to-live. Expiry is checked on read; stale entries are never
//! served. The whole cache can be cleared at once.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

/// Cache key: the SQL text and its parameters rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub params: Vec<String>,
}

impl CacheKey {
    pub fn new(query: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// TTL cache of query results.
///
/// Values are cloned out on read, so store something cheap to clone
/// (an `Arc` around the rows).
pub struct QueryCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry<V>>>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, or `None` if absent or older than the TTL.
    pub async fn get(&self, key: &CacheKey) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.inserted_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store `value` under `key`, replacing any previous entry and dropping
    /// entries that have already expired.
    pub async fn insert(&self, key: CacheKey, value: V) {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every entry.
    pub async fn invalidate_all(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn key(param: &str) -> CacheKey {
        CacheKey::new("SELECT 1", vec![param.to_string()])
    }

    #[tokio::test(start_paused = true)]
    async fn returns_value_within_ttl() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert(key("a"), 7).await;
        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(&key("a")).await, Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn expires_after_ttl() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert(key("a"), 7).await;
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.get(&key("a")).await, None);
    }

    #[tokio::test]
    async fn params_are_part_of_the_key() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert(key("a"), 1).await;
        assert_eq!(cache.get(&key("b")).await, None);
        let other_query = CacheKey::new("SELECT 2", vec!["a".to_string()]);
        assert_eq!(cache.get(&other_query).await, None);
    }

    #[tokio::test]
    async fn invalidate_clears_everything() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert(key("a"), 1).await;
        cache.insert(key("b"), 2).await;
        assert_eq!(cache.len().await, 2);
        cache.invalidate_all().await;
        assert!(cache.is_empty().await);
        assert_eq!(cache.get(&key("a")).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn insert_prunes_expired_entries() {
        let cache = QueryCache::new(Duration::from_secs(10));
        cache.insert(key("old"), 1).await;
        tokio::time::advance(Duration::from_secs(11)).await;
        cache.insert(key("new"), 2).await;
        assert_eq!(cache.len().await, 1);
    }
}

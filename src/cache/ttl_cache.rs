//! In-process map with per-entry expiry.
//!
//! Backs the cache store whenever the durable store is unreachable. Each
//! entry carries its own deadline; expired entries are dropped lazily when
//! read. There is no capacity bound.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use dota_analytics::cache::TtlCache;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut cache: TtlCache<String, String> = TtlCache::new(Duration::from_secs(300));
//!
//! cache.insert_with_ttl("player:1".to_string(), "{}".to_string(), Duration::from_secs(60));
//! assert!(cache.get("player:1").is_some());
//!
//! cache.remove("player:1");
//! assert!(cache.get("player:1").is_none());
//! # }
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

/// A map whose entries expire after their own TTL.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    cache: HashMap<K, (V, Instant)>,
    default_ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq,
{
    /// Create a cache whose [`insert`](Self::insert) uses `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            cache: HashMap::new(),
            default_ttl,
        }
    }

    /// Insert with the default TTL.
    pub fn insert(&mut self, key: K, value: V) {
        let ttl = self.default_ttl;
        self.insert_with_ttl(key, value, ttl);
    }

    /// Insert an entry that expires `ttl` from now, replacing any previous one.
    pub fn insert_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        self.cache.insert(key, (value, Instant::now() + ttl));
    }

    /// Get a live entry. An expired entry is removed and reported as a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = match self.cache.get(key) {
            Some((_, expires_at)) => Instant::now() >= *expires_at,
            None => return None,
        };

        if expired {
            self.cache.remove(key);
            return None;
        }

        self.cache.get(key).map(|(value, _)| value)
    }

    /// Time left before an entry expires.
    pub fn time_to_live<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.get(key).and_then(|(_, expires_at)| {
            let now = Instant::now();
            (now < *expires_at).then(|| *expires_at - now)
        })
    }

    /// Remove an entry. Returns the value if it had not expired.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache
            .remove(key)
            .and_then(|(value, expires_at)| (Instant::now() < expires_at).then_some(value))
    }

    /// Check if a key exists and hasn't expired.
    pub fn contains<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Drop every expired entry.
    pub fn cleanup(&mut self) {
        let now = Instant::now();
        self.cache.retain(|_, (_, expires_at)| now < *expires_at);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear all entries from the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> TtlCache<String, String> {
        TtlCache::new(Duration::from_secs(60))
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_applies() {
        let mut cache = entries();

        cache.insert("player:1".to_string(), r#"{"rank_tier":80}"#.to_string());
        assert_eq!(cache.get("player:1").map(String::as_str), Some(r#"{"rank_tier":80}"#));
        assert!(cache.get("player:2").is_none());

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!cache.contains("player:1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_entry_expiry_is_lazy() {
        let mut cache = entries();

        cache.insert_with_ttl("live:all".to_string(), "[]".to_string(), Duration::from_secs(1));
        cache.insert_with_ttl("heroes:data:all".to_string(), "[]".to_string(), Duration::from_secs(10));

        tokio::time::advance(Duration::from_secs(1)).await;

        // Still stored until something reads it.
        assert_eq!(cache.len(), 2);
        assert!(cache.get("live:all").is_none());
        assert_eq!(cache.len(), 1);
        assert!(cache.get("heroes:data:all").is_some());
        assert_eq!(
            cache.time_to_live("heroes:data:all"),
            Some(Duration::from_secs(9))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinsert_resets_deadline() {
        let mut cache = TtlCache::default();

        cache.insert_with_ttl("session:1".to_string(), 1u32, Duration::from_secs(2));
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.insert_with_ttl("session:1".to_string(), 2u32, Duration::from_secs(2));
        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(cache.get("session:1"), Some(&2));
        assert_eq!(cache.default_ttl(), Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_skips_expired_values() {
        let mut cache = entries();

        cache.insert_with_ttl("pros:all".to_string(), "a".to_string(), Duration::from_millis(50));
        cache.insert_with_ttl("search:x".to_string(), "b".to_string(), Duration::from_millis(50));
        assert_eq!(cache.remove("search:x").as_deref(), Some("b"));

        tokio::time::advance(Duration::from_millis(60)).await;
        assert_eq!(cache.remove("pros:all"), None);

        cache.insert("player:1".to_string(), "c".to_string());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_drops_only_expired() {
        let mut cache = entries();

        cache.insert_with_ttl("a".to_string(), String::new(), Duration::from_secs(1));
        cache.insert("b".to_string(), String::new());

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.cleanup();
        assert_eq!(cache.len(), 1);
    }
}

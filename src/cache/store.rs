//! Two-tier cache: a durable store with an in-process fallback.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::cache::{Cached, DurableStore, TtlCache};
use crate::error::AnalyticsError;

/// Upper bound on one connection attempt (connect plus availability probe).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Connection state of the durable tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    fn as_u8(self) -> u8 {
        match self {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connecting => 1,
            ConnectionState::Connected => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// Key/value cache with per-key TTL that never fails its callers.
///
/// Reads and writes go to the durable store while it is reachable. A failed
/// connection attempt marks the store unavailable for the lifetime of this
/// instance, after which everything is served from process memory. An error
/// on an open connection only drops the connection; the next call tries to
/// reconnect once.
///
/// Values are stored as JSON.
///
/// # Example
///
/// ```rust,no_run
/// use dota_analytics::cache::{CacheStore, RedisStore, keys};
///
/// # async fn demo() {
/// let cache = CacheStore::new(RedisStore::localhost());
/// cache.set("player:1", &42u32, keys::ttl::PLAYER).await;
/// let hit: Option<u32> = cache.get("player:1").await;
/// # }
/// ```
pub struct CacheStore<S> {
    durable: S,
    state: AtomicU8,
    unavailable: AtomicBool,
    connect_gate: Mutex<()>,
    memory: Mutex<TtlCache<String, String>>,
    connect_timeout: Duration,
}

impl<S: DurableStore> CacheStore<S> {
    pub fn new(durable: S) -> Self {
        Self {
            durable,
            state: AtomicU8::new(ConnectionState::Disconnected.as_u8()),
            unavailable: AtomicBool::new(false),
            connect_gate: Mutex::new(()),
            memory: Mutex::new(TtlCache::default()),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the bound on a single connection attempt.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn durable(&self) -> &S {
        &self.durable
    }

    pub fn connection_state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether the durable tier is currently unusable (never connected, dropped
    /// or permanently unavailable).
    pub fn is_degraded(&self) -> bool {
        self.unavailable.load(Ordering::Acquire)
            || self.connection_state() != ConnectionState::Connected
    }

    /// Whether a connection attempt has failed. Sticky.
    pub fn is_unavailable(&self) -> bool {
        self.unavailable.load(Ordering::Acquire)
    }

    /// Read and decode a value. Misses, decode failures and durable errors
    /// all come back as `None`.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = self.get_raw(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(key, error = %err, "discarding undecodable cache entry");
                None
            }
        }
    }

    /// Store a value for `ttl_secs` seconds.
    ///
    /// Returns `true` when the durable store accepted the write. On `false`
    /// the value is held in memory instead, unless it could not be serialized.
    pub async fn set<T>(&self, key: &str, value: &T, ttl_secs: u64) -> bool
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_string(value) {
            Ok(raw) => self.set_raw(key, raw, ttl_secs, false).await,
            Err(err) => {
                tracing::warn!(key, error = %err, "value not serializable, not cached");
                false
            }
        }
    }

    /// Remove a key from both tiers. Returns whether the durable delete ran.
    pub async fn delete(&self, key: &str) -> bool {
        self.memory.lock().await.remove(key);

        if !self.ensure_connected().await {
            return false;
        }
        match self.durable.del(key).await {
            Ok(_) => true,
            Err(err) => {
                self.on_operation_error("delete", key, &err);
                false
            }
        }
    }

    /// Whether a live value exists for `key` in whichever tier is in use.
    pub async fn exists(&self, key: &str) -> bool {
        if self.ensure_connected().await {
            match self.durable.exists(key).await {
                Ok(exists) => return exists,
                Err(err) => self.on_operation_error("exists", key, &err),
            }
        }
        self.memory.lock().await.contains(key)
    }

    /// Return the cached value for `key`, or run `fetcher`, cache its result
    /// in both tiers and return it.
    ///
    /// Fetcher errors propagate and nothing is cached.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &str,
        ttl_secs: u64,
        fetcher: F,
    ) -> Result<Cached<T>, AnalyticsError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AnalyticsError>>,
    {
        if let Some(data) = self.get(key).await {
            return Ok(Cached::hit(data));
        }

        let data = fetcher().await?;
        match serde_json::to_string(&data) {
            Ok(raw) => {
                self.set_raw(key, raw, ttl_secs, true).await;
            }
            Err(err) => tracing::warn!(key, error = %err, "value not serializable, not cached"),
        }
        Ok(Cached::fresh(data))
    }

    /// Flush the durable store (when reachable) and clear memory.
    pub async fn clear_all(&self) -> bool {
        self.memory.lock().await.clear();

        if !self.ensure_connected().await {
            return false;
        }
        match self.durable.flush().await {
            Ok(()) => true,
            Err(err) => {
                self.on_operation_error("flush", "*", &err);
                false
            }
        }
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        if self.ensure_connected().await {
            match self.durable.get(key).await {
                Ok(Some(raw)) => {
                    tracing::debug!(key, "cache hit");
                    return Some(raw);
                }
                Ok(None) => {}
                Err(err) => self.on_operation_error("get", key, &err),
            }
        }

        let hit = self.memory.lock().await.get(key).cloned();
        tracing::debug!(key, hit = hit.is_some(), "memory cache lookup");
        hit
    }

    async fn set_raw(&self, key: &str, raw: String, ttl_secs: u64, mirror: bool) -> bool {
        // SETEX rejects a zero TTL.
        let ttl_secs = ttl_secs.max(1);

        let mut stored = false;
        if self.ensure_connected().await {
            match self.durable.set_ex(key, &raw, ttl_secs).await {
                Ok(()) => stored = true,
                Err(err) => self.on_operation_error("set", key, &err),
            }
        }

        // An older mirror must not outlive a newer durable write.
        let mut memory = self.memory.lock().await;
        if !stored || mirror || memory.contains(key) {
            memory.insert_with_ttl(key.to_string(), raw, Duration::from_secs(ttl_secs));
        }
        stored
    }

    async fn ensure_connected(&self) -> bool {
        if self.unavailable.load(Ordering::Acquire) {
            return false;
        }
        if self.connection_state() == ConnectionState::Connected {
            return true;
        }

        let _gate = self.connect_gate.lock().await;

        // Another caller may have settled it while we waited.
        if self.unavailable.load(Ordering::Acquire) {
            return false;
        }
        if self.connection_state() == ConnectionState::Connected {
            return true;
        }

        self.set_state(ConnectionState::Connecting);
        let attempt = async {
            self.durable.connect().await?;
            self.durable.ping().await
        };

        match tokio::time::timeout(self.connect_timeout, attempt).await {
            Ok(Ok(())) => {
                self.set_state(ConnectionState::Connected);
                tracing::info!("durable cache connected");
                true
            }
            Ok(Err(err)) => {
                self.mark_unavailable(&err.to_string());
                false
            }
            Err(_) => {
                self.mark_unavailable("connection attempt timed out");
                false
            }
        }
    }

    fn mark_unavailable(&self, reason: &str) {
        self.unavailable.store(true, Ordering::Release);
        self.set_state(ConnectionState::Disconnected);
        tracing::warn!(reason, "durable cache unavailable, using in-memory fallback");
    }

    fn on_operation_error(&self, operation: &'static str, key: &str, err: &AnalyticsError) {
        self.set_state(ConnectionState::Disconnected);
        tracing::warn!(operation, key, error = %err, "durable cache operation failed");
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for CacheStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("durable", &self.durable)
            .field(
                "state",
                &ConnectionState::from_u8(self.state.load(Ordering::Acquire)),
            )
            .field("unavailable", &self.unavailable.load(Ordering::Acquire))
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

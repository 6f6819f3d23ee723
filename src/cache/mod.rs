//! Caching for upstream responses and derived results.
//!
//! [`CacheStore`] fronts a [`DurableStore`] (Redis by default) and falls back
//! to an in-process [`TtlCache`] whenever the durable store is unreachable.
//! Callers never see cache errors: the worst case is a miss.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dota_analytics::cache::{CacheStore, RedisStore, keys};
//!
//! let cache = CacheStore::new(RedisStore::localhost());
//! let heroes = cache
//!     .get_or_fetch(&keys::heroes_data(), keys::ttl::HEROES_DATA, || client.get_heroes())
//!     .await?;
//! println!("cached: {}", heroes.cached);
//! ```

mod durable;
pub mod keys;
mod redis_store;
mod store;
mod ttl_cache;

pub use durable::DurableStore;
pub use redis_store::{DEFAULT_REDIS_URL, RedisStore};
pub use store::{CacheStore, ConnectionState, DEFAULT_CONNECT_TIMEOUT};
pub use ttl_cache::TtlCache;

use serde::{Deserialize, Serialize};

/// A value together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cached<T> {
    pub data: T,
    /// Served from cache rather than freshly computed.
    pub cached: bool,
    /// Served from cache because the upstream call failed.
    pub stale: bool,
}

impl<T> Cached<T> {
    /// Freshly fetched or computed.
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            cached: false,
            stale: false,
        }
    }

    /// Read from cache.
    pub fn hit(data: T) -> Self {
        Self {
            data,
            cached: true,
            stale: false,
        }
    }

    /// Read from cache after an upstream failure.
    pub fn stale(data: T) -> Self {
        Self {
            data,
            cached: true,
            stale: true,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Cached<U> {
        Cached {
            data: f(self.data),
            cached: self.cached,
            stale: self.stale,
        }
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

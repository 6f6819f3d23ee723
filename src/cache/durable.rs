//! Durable key/value store abstraction.

use std::future::Future;

use crate::error::AnalyticsError;

/// Operations the cache store needs from a durable backend.
///
/// Values are opaque strings (serialized JSON). Implementations report every
/// failure as an error; [`CacheStore`](crate::cache::CacheStore) decides how
/// to degrade.
pub trait DurableStore: Send + Sync {
    /// Open a connection. Called again after a dropped connection.
    fn connect(&self) -> impl Future<Output = Result<(), AnalyticsError>> + Send;

    /// Availability probe on an open connection.
    fn ping(&self) -> impl Future<Output = Result<(), AnalyticsError>> + Send;

    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, AnalyticsError>> + Send;

    /// Store `value` under `key`, expiring after `ttl_secs`.
    fn set_ex(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = Result<(), AnalyticsError>> + Send;

    /// Delete `key`. Returns whether it existed.
    fn del(&self, key: &str) -> impl Future<Output = Result<bool, AnalyticsError>> + Send;

    fn exists(&self, key: &str) -> impl Future<Output = Result<bool, AnalyticsError>> + Send;

    /// Remove every key.
    fn flush(&self) -> impl Future<Output = Result<(), AnalyticsError>> + Send;
}

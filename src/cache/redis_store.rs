//! Redis-backed [`DurableStore`].

use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::cache::DurableStore;
use crate::error::AnalyticsError;

/// Default Redis connection string.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// A Redis server reached through one multiplexed async connection.
///
/// The connection string may carry a password, so it is kept secret and
/// never printed.
pub struct RedisStore {
    url: SecretString,
    connection: RwLock<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Create a store for `url`. No connection is made until
    /// [`DurableStore::connect`] is called.
    pub fn new(url: SecretString) -> Self {
        Self {
            url,
            connection: RwLock::new(None),
        }
    }

    /// Store for the default local server.
    pub fn localhost() -> Self {
        Self::new(SecretString::from(DEFAULT_REDIS_URL))
    }

    async fn connection(&self) -> Result<MultiplexedConnection, AnalyticsError> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or_else(|| AnalyticsError::CacheUnavailable("not connected".to_string()))
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("url", &"[REDACTED]")
            .finish()
    }
}

impl DurableStore for RedisStore {
    async fn connect(&self) -> Result<(), AnalyticsError> {
        let client = redis::Client::open(self.url.expose_secret())?;
        let conn = client.get_multiplexed_async_connection().await?;
        *self.connection.write().await = Some(conn);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AnalyticsError> {
        let mut conn = self.connection().await?;
        let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AnalyticsError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AnalyticsError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, AnalyticsError> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, AnalyticsError> {
        let mut conn = self.connection().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn flush(&self) -> Result<(), AnalyticsError> {
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_url() {
        let store = RedisStore::new(SecretString::from("redis://:hunter2@cache:6379"));
        let debug = format!("{store:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_operations_fail_before_connect() {
        let store = RedisStore::localhost();
        assert!(matches!(
            store.get("player:1").await,
            Err(AnalyticsError::CacheUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_is_unavailable() {
        let store = RedisStore::new(SecretString::from("not a url"));
        assert!(matches!(
            store.connect().await,
            Err(AnalyticsError::CacheUnavailable(_))
        ));
    }
}

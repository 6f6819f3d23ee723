//! Example: Two-tier cache with memory fallback.
//!
//! Uses Redis on localhost when it is running and the in-process tier
//! otherwise.
//!
//! Run with: cargo run --example cache_fallback

use std::time::Duration;

use dota_analytics::AnalyticsError;
use dota_analytics::cache::{CacheStore, RedisStore, keys};
use dota_analytics::types::AccountId;

#[tokio::main]
async fn main() -> Result<(), AnalyticsError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dota_analytics=debug".into()),
        )
        .init();

    let cache = CacheStore::new(RedisStore::localhost())
        .with_connect_timeout(Duration::from_millis(500));
    let account = AccountId::new(86_745_912);
    let key = keys::session(account);

    let stored = cache.set(&key, &vec![1u32, 2, 3], keys::ttl::SESSION).await;
    println!("Durable write accepted: {stored}");
    println!("Connection: {:?}", cache.connection_state());
    println!("Degraded: {}", cache.is_degraded());

    let value: Option<Vec<u32>> = cache.get(&key).await;
    println!("Read back: {value:?}");

    // The second call is served from cache; the fetcher never runs.
    for attempt in 1..=2 {
        let heroes = cache
            .get_or_fetch(&keys::heroes_data(), keys::ttl::HEROES_DATA, || async {
                Ok(vec!["Anti-Mage".to_string(), "Invoker".to_string()])
            })
            .await?;
        println!("Attempt {attempt}: cached={} {:?}", heroes.cached, heroes.data);
    }

    // Errors from the fetcher are returned and nothing is stored.
    let failed = cache
        .get_or_fetch(&keys::live(), keys::ttl::LIVE, || async {
            Err::<Vec<u64>, _>(AnalyticsError::Timeout)
        })
        .await;
    println!("Failed fetch: {failed:?}");
    println!("Live cached afterwards: {}", cache.exists(&keys::live()).await);

    cache.delete(&key).await;
    Ok(())
}

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_test::{assert_pending, assert_ready};

use dota_analytics::rate_limit::{RateLimitConfig, RateLimiter};

fn limiter(max_requests: u32, window_secs: u64) -> RateLimiter {
    RateLimiter::new(RateLimitConfig {
        max_requests,
        window: Duration::from_secs(window_secs),
        enabled: true,
    })
}

#[tokio::test(start_paused = true)]
async fn test_caller_suspends_until_window_rolls() {
    let limiter = limiter(2, 60);
    limiter.acquire().await;
    limiter.acquire().await;

    let mut third = tokio_test::task::spawn(limiter.acquire());
    assert_pending!(third.poll());

    tokio::time::advance(Duration::from_secs(30)).await;
    assert_pending!(third.poll());

    tokio::time::advance(Duration::from_secs(30)).await;
    assert_ready!(third.poll());
}

#[tokio::test(start_paused = true)]
async fn test_waiters_served_in_arrival_order() {
    let limiter = limiter(1, 60);
    limiter.acquire().await;

    let mut first = tokio_test::task::spawn(limiter.acquire());
    let mut second = tokio_test::task::spawn(limiter.acquire());
    assert_pending!(first.poll());
    assert_pending!(second.poll());

    tokio::time::advance(Duration::from_secs(60)).await;
    // The first waiter still holds the limiter.
    assert_pending!(second.poll());
    assert_ready!(first.poll());

    assert!(second.is_woken());
    assert_pending!(second.poll());

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_ready!(second.poll());
}

#[tokio::test(start_paused = true)]
async fn test_never_exceeds_quota_in_any_window() {
    let limiter = limiter(3, 10);
    let grants = Arc::new(Mutex::new(Vec::new()));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let limiter = limiter.clone();
        let grants = Arc::clone(&grants);
        handles.push(tokio::spawn(async move {
            limiter.acquire().await;
            grants.lock().await.push(Instant::now());
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut grants = grants.lock().await.clone();
    grants.sort();
    assert_eq!(grants.len(), 10);
    for pair in grants.windows(4) {
        assert!(pair[3] - pair[0] >= Duration::from_secs(10));
    }
}

#[tokio::test(start_paused = true)]
async fn test_dropped_waiter_keeps_quota() {
    let limiter = limiter(1, 60);
    limiter.acquire().await;

    let mut abandoned = tokio_test::task::spawn(limiter.acquire());
    assert_pending!(abandoned.poll());
    drop(abandoned);

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(limiter.remaining(), Some(1));
}

//! Rate-limited stats client wrapper.
//!
//! Provides a wrapper around any [`StatsApi`] implementation that takes one
//! unit of quota before every delegated call, whether or not the call then
//! succeeds.
//!
//! # Example
//!
//! ```rust,ignore
//! use dota_analytics::opendota::OpenDotaClient;
//! use dota_analytics::rate_limit::{RateLimitedClient, RateLimiter};
//!
//! let limiter = RateLimiter::opendota();
//! let client = RateLimitedClient::with_limiter(OpenDotaClient::new(), limiter.clone());
//!
//! let profile = client.get_player_profile(86745912.into()).await?;
//! ```

use crate::error::AnalyticsError;
use crate::opendota::{
    Hero, LiveGame, MatchDetail, MatchRecord, MatchesRequest, PeerStats, PlayerHeroStats,
    PlayerProfile, ProPlayer, SearchResult, StatsApi,
};
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::types::{AccountId, MatchId};

/// A rate-limited wrapper around any [`StatsApi`] implementation.
pub struct RateLimitedClient<C> {
    inner: C,
    limiter: RateLimiter,
}

impl<C> RateLimitedClient<C> {
    /// Create a new rate-limited client wrapper with its own limiter.
    pub fn new(inner: C, config: RateLimitConfig) -> Self {
        Self::with_limiter(inner, RateLimiter::new(config))
    }

    /// Wrap `inner` with an existing (possibly shared) limiter.
    pub fn with_limiter(inner: C, limiter: RateLimiter) -> Self {
        Self { inner, limiter }
    }

    /// Get a reference to the inner client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Get the limiter guarding the inner client.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for RateLimitedClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedClient")
            .field("inner", &self.inner)
            .field("config", self.limiter.config())
            .finish()
    }
}

impl<C: Clone> Clone for RateLimitedClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            limiter: self.limiter.clone(),
        }
    }
}

impl<C: StatsApi> StatsApi for RateLimitedClient<C> {
    async fn get_player_profile(&self, account: AccountId) -> Result<PlayerProfile, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_player_profile(account).await
    }

    async fn get_player_matches(
        &self,
        account: AccountId,
        request: &MatchesRequest,
    ) -> Result<Vec<MatchRecord>, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_player_matches(account, request).await
    }

    async fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> Result<Vec<MatchRecord>, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_recent_matches(account).await
    }

    async fn get_player_heroes(
        &self,
        account: AccountId,
    ) -> Result<Vec<PlayerHeroStats>, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_player_heroes(account).await
    }

    async fn get_player_peers(&self, account: AccountId) -> Result<Vec<PeerStats>, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_player_peers(account).await
    }

    async fn get_match(&self, match_id: MatchId) -> Result<MatchDetail, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_match(match_id).await
    }

    async fn get_heroes(&self) -> Result<Vec<Hero>, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_heroes().await
    }

    async fn get_live_games(&self) -> Result<Vec<LiveGame>, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_live_games().await
    }

    async fn get_pro_players(&self) -> Result<Vec<ProPlayer>, AnalyticsError> {
        self.limiter.acquire().await;
        self.inner.get_pro_players().await
    }

    async fn search_players(&self, term: &str) -> Result<Vec<SearchResult>, AnalyticsError> {
        // Blank terms are rejected before taking quota.
        crate::opendota::validate_search_term(term)?;
        self.limiter.acquire().await;
        self.inner.search_players(term).await
    }
}

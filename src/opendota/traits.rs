//! Trait definition for the stats API client.
//!
//! [`StatsApi`] abstracts every upstream read so that the analytics layer can
//! run against the raw HTTP client, the rate-limited decorator, or an
//! in-memory fake in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use dota_analytics::opendota::StatsApi;
//! use dota_analytics::types::AccountId;
//!
//! async fn persona<C: StatsApi>(client: &C, id: AccountId) -> dota_analytics::Result<()> {
//!     let profile = client.get_player_profile(id).await?;
//!     println!("{:?}", profile.profile.and_then(|p| p.personaname));
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::AnalyticsError;
use crate::opendota::types::{
    Hero, LiveGame, MatchDetail, MatchRecord, MatchesRequest, PeerStats, PlayerHeroStats,
    PlayerProfile, ProPlayer, SearchResult,
};
use crate::types::{AccountId, MatchId};

/// Every upstream read the analytics core performs.
///
/// All methods are async and return `Result<T, AnalyticsError>`.
pub trait StatsApi: Send + Sync {
    /// Get a player's profile.
    fn get_player_profile(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<PlayerProfile, AnalyticsError>> + Send;

    /// Get a page of a player's match history.
    fn get_player_matches(
        &self,
        account: AccountId,
        request: &MatchesRequest,
    ) -> impl Future<Output = Result<Vec<MatchRecord>, AnalyticsError>> + Send;

    /// Get a player's last 20 matches.
    fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Vec<MatchRecord>, AnalyticsError>> + Send;

    /// Get a player's per-hero totals.
    fn get_player_heroes(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Vec<PlayerHeroStats>, AnalyticsError>> + Send;

    /// Get the players seen alongside a player.
    fn get_player_peers(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Vec<PeerStats>, AnalyticsError>> + Send;

    /// Get full details for one match.
    fn get_match(
        &self,
        match_id: MatchId,
    ) -> impl Future<Output = Result<MatchDetail, AnalyticsError>> + Send;

    /// Get the hero catalog.
    fn get_heroes(&self) -> impl Future<Output = Result<Vec<Hero>, AnalyticsError>> + Send;

    /// Get games currently in progress.
    fn get_live_games(&self) -> impl Future<Output = Result<Vec<LiveGame>, AnalyticsError>> + Send;

    /// Get the professional player listing.
    fn get_pro_players(
        &self,
    ) -> impl Future<Output = Result<Vec<ProPlayer>, AnalyticsError>> + Send;

    /// Search players by persona name.
    fn search_players(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, AnalyticsError>> + Send;

    /// Whether `account` appears in the professional listing.
    ///
    /// Any failure fetching the listing answers `false`.
    fn is_pro_player(&self, account: AccountId) -> impl Future<Output = bool> + Send {
        async move {
            match self.get_pro_players().await {
                Ok(pros) => pros.iter().any(|p| p.account_id == account.get()),
                Err(err) => {
                    tracing::debug!(%account, error = %err, "pro listing unavailable");
                    false
                }
            }
        }
    }
}

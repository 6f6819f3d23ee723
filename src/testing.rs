//! Fixtures shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::cache::DurableStore;
use crate::error::{AnalyticsError, UpstreamError};
use crate::opendota::{
    Hero, LiveGame, MatchDetail, MatchRecord, MatchesRequest, PeerStats, PlayerHeroStats,
    PlayerProfile, ProPlayer, SearchResult, StatsApi,
};
use crate::types::{AccountId, MatchId};

pub(crate) fn match_record(
    match_id: u64,
    hero_id: u32,
    player_slot: u8,
    radiant_win: bool,
    start_time: i64,
) -> MatchRecord {
    MatchRecord {
        match_id,
        hero_id,
        player_slot,
        radiant_win,
        start_time,
        ..MatchRecord::default()
    }
}

/// A match on `hero_id` that the player won or lost.
pub(crate) fn game(match_id: u64, hero_id: u32, won: bool, start_time: i64) -> MatchRecord {
    match_record(match_id, hero_id, 0, won, start_time)
}

/// A canned [`StatsApi`] that can be switched into failure mode.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub profile: PlayerProfile,
    pub matches: Vec<MatchRecord>,
    pub hero_stats: Vec<PlayerHeroStats>,
    pub peers: Vec<PeerStats>,
    pub heroes: Vec<Hero>,
    pub details: HashMap<u64, MatchDetail>,
    pub live: Vec<LiveGame>,
    pub failing: AtomicBool,
    /// Fails only the peers endpoint.
    pub failing_peers: AtomicBool,
    pub calls: AtomicUsize,
}

impl FakeApi {
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond<T: Clone>(&self, value: &T) -> Result<T, AnalyticsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AnalyticsError::Upstream(UpstreamError::new(
                503,
                "Service Unavailable",
            )));
        }
        Ok(value.clone())
    }
}

impl StatsApi for FakeApi {
    async fn get_player_profile(&self, _: AccountId) -> Result<PlayerProfile, AnalyticsError> {
        self.respond(&self.profile)
    }

    async fn get_player_matches(
        &self,
        _: AccountId,
        request: &MatchesRequest,
    ) -> Result<Vec<MatchRecord>, AnalyticsError> {
        let offset = request.offset.unwrap_or(0) as usize;
        let limit = request.limit.map_or(usize::MAX, |l| l as usize);
        let page: Vec<MatchRecord> = self
            .matches
            .iter()
            .filter(|m| request.hero_id.is_none_or(|id| m.hero_id == id))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        self.respond(&page)
    }

    async fn get_recent_matches(&self, _: AccountId) -> Result<Vec<MatchRecord>, AnalyticsError> {
        let recent: Vec<MatchRecord> = self.matches.iter().take(20).cloned().collect();
        self.respond(&recent)
    }

    async fn get_player_heroes(&self, _: AccountId) -> Result<Vec<PlayerHeroStats>, AnalyticsError> {
        self.respond(&self.hero_stats)
    }

    async fn get_player_peers(&self, _: AccountId) -> Result<Vec<PeerStats>, AnalyticsError> {
        if self.failing_peers.load(Ordering::SeqCst) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            return Err(AnalyticsError::Upstream(UpstreamError::new(502, "Bad Gateway")));
        }
        self.respond(&self.peers)
    }

    async fn get_match(&self, match_id: MatchId) -> Result<MatchDetail, AnalyticsError> {
        match self.details.get(&match_id.get()) {
            Some(detail) => self.respond(detail),
            None => {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(AnalyticsError::Upstream(UpstreamError::new(404, "Not Found")))
            }
        }
    }

    async fn get_heroes(&self) -> Result<Vec<Hero>, AnalyticsError> {
        self.respond(&self.heroes)
    }

    async fn get_live_games(&self) -> Result<Vec<LiveGame>, AnalyticsError> {
        self.respond(&self.live)
    }

    async fn get_pro_players(&self) -> Result<Vec<ProPlayer>, AnalyticsError> {
        self.respond(&Vec::new())
    }

    async fn search_players(&self, _: &str) -> Result<Vec<SearchResult>, AnalyticsError> {
        self.respond(&Vec::new())
    }
}

/// A durable store that can never be reached, leaving only the memory tier.
#[derive(Debug, Default)]
pub(crate) struct OfflineStore;

impl DurableStore for OfflineStore {
    async fn connect(&self) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::CacheUnavailable("offline".to_string()))
    }

    async fn ping(&self) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::CacheUnavailable("offline".to_string()))
    }

    async fn get(&self, _: &str) -> Result<Option<String>, AnalyticsError> {
        Err(AnalyticsError::CacheUnavailable("offline".to_string()))
    }

    async fn set_ex(&self, _: &str, _: &str, _: u64) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::CacheUnavailable("offline".to_string()))
    }

    async fn del(&self, _: &str) -> Result<bool, AnalyticsError> {
        Err(AnalyticsError::CacheUnavailable("offline".to_string()))
    }

    async fn exists(&self, _: &str) -> Result<bool, AnalyticsError> {
        Err(AnalyticsError::CacheUnavailable("offline".to_string()))
    }

    async fn flush(&self) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::CacheUnavailable("offline".to_string()))
    }
}

pub(crate) fn hero(id: u32, short_name: &str, localized_name: &str) -> Hero {
    Hero {
        id,
        name: format!("npc_dota_hero_{short_name}"),
        localized_name: localized_name.to_string(),
        primary_attr: None,
        attack_type: None,
        roles: Vec::new(),
        legs: 2,
    }
}

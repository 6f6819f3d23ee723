//! Request orchestration: cache first, then upstream, then derive.
//!
//! [`PlayerAnalytics`] is the composition root a web layer calls into. Every
//! operation reads its cache key, falls through to the stats API on a miss,
//! derives the response, and stores it. When the stats API fails, the last
//! good response (kept under a [`stale`](crate::cache::keys::stale) key for a
//! day) is served with [`Cached::stale`] set.
//!
//! ```rust,no_run
//! use dota_analytics::config::AnalyticsConfig;
//! use dota_analytics::service::PlayerAnalytics;
//!
//! # async fn demo() -> dota_analytics::Result<()> {
//! let analytics = PlayerAnalytics::from_config(&AnalyticsConfig::from_env()?);
//! let account = "76561198047011640".parse()?;
//! let roles = analytics.roles(account).await?;
//! println!("{} (stale: {})", roles.data.unknown_note, roles.stale);
//! # Ok(())
//! # }
//! ```

mod reports;

pub use reports::{
    HeroDetail, HeroTrends, HeroWithStats, HeroesReport, LiveStatus, MatchResult, RecentMatch,
};

use std::collections::HashMap;
use std::future::Future;

use futures_util::future::{join_all, join3, try_join3};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use crate::cache::{CacheStore, Cached, DurableStore, RedisStore, keys};
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::insights::{InsightConfig, InsightsReport, aggregate_player_data, generate_report};
use crate::opendota::{
    Hero, LiveGame, MatchRecord, MatchesRequest, OpenDotaClient, PlayerHeroStats, PlayerProfile,
    ProPlayer, SearchResult, StatsApi,
};
use crate::rate_limit::RateLimitedClient;
use crate::stats::{
    self, ComfortLabel, HeatmapCell, HeroAggregate, MmrPoint, PeersReport, RoleBreakdown,
    SessionSummary, TrendsReport, avg_gpm, avg_kda, build_heatmap, build_trends, comfort_score,
    mmr_history, peer_synergy, role_breakdown, session_summary,
};
use crate::types::AccountId;

/// Matches per page of history.
pub const PAGE_SIZE: u32 = 20;
/// History depth for hero, role, trend and peer calculations.
pub const HISTORY_LIMIT: u32 = 500;
pub const HEATMAP_LIMIT: u32 = 200;
/// History depth for session and insight calculations.
pub const RECENT_LIMIT: u32 = 100;
pub const DEFAULT_TREND_LIMIT: u32 = 100;
/// Parsed matches fetched in full to recover lane data.
pub const MAX_ENRICHED_MATCHES: usize = 50;
/// Heroes need this many games to compete for best winrate.
pub const MIN_GAMES_FOR_BEST_WINRATE: u32 = 5;
/// History depth on a single hero.
pub const HERO_DETAIL_LIMIT: u32 = 100;
pub const HERO_RECENT_MATCHES: usize = 20;

/// Cached, rate-limited player analytics.
pub struct PlayerAnalytics<C, S> {
    client: C,
    cache: CacheStore<S>,
    insight_config: InsightConfig,
    clock: fn() -> i64,
}

/// The production wiring: OpenDota behind a rate limiter, cached in Redis.
pub type DefaultAnalytics = PlayerAnalytics<RateLimitedClient<OpenDotaClient>, RedisStore>;

impl DefaultAnalytics {
    /// Build the client, limiter and cache described by `config`.
    ///
    /// Nothing connects until the first operation runs.
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        let mut builder = OpenDotaClient::builder()
            .base_url(config.base_url.as_str())
            .timeout(config.request_timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let client = RateLimitedClient::new(builder.build(), config.rate_limit.clone());

        let store = RedisStore::new(SecretString::from(config.expose_redis_url()));
        let cache = CacheStore::new(store).with_connect_timeout(config.redis_connect_timeout);

        Self::new(client, cache)
    }
}

impl<C: StatsApi, S: DurableStore> PlayerAnalytics<C, S> {
    pub fn new(client: C, cache: CacheStore<S>) -> Self {
        Self {
            client,
            cache,
            insight_config: InsightConfig::default(),
            clock: unix_now,
        }
    }

    pub fn with_insight_config(mut self, config: InsightConfig) -> Self {
        self.insight_config = config;
        self
    }

    /// Replace the wall clock (Unix seconds) used for recency and sessions.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &CacheStore<S> {
        &self.cache
    }

    pub async fn profile(&self, account: AccountId) -> Result<Cached<PlayerProfile>, AnalyticsError> {
        self.cached(keys::player(account), keys::ttl::PLAYER, || {
            self.client.get_player_profile(account)
        })
        .await
    }

    /// One page of match history, newest first. Pages start at 1.
    pub async fn matches(
        &self,
        account: AccountId,
        page: u32,
    ) -> Result<Cached<Vec<MatchRecord>>, AnalyticsError> {
        let page = page.max(1);
        let request = MatchesRequest::latest(PAGE_SIZE).offset((page - 1) * PAGE_SIZE);
        self.cached(keys::player_matches(account, page), keys::ttl::MATCHES, || async move {
            self.client.get_player_matches(account, &request).await
        })
        .await
    }

    /// The player's hero pool with comfort score, KDA and GPM per hero.
    pub async fn heroes_with_comfort(
        &self,
        account: AccountId,
    ) -> Result<Cached<HeroesReport>, AnalyticsError> {
        self.cached(keys::player_heroes(account), keys::ttl::HEROES, || async move {
            let (hero_stats, matches, catalog) = try_join3(
                self.client.get_player_heroes(account),
                self.history(account, HISTORY_LIMIT),
                self.hero_catalog(),
            )
            .await?;
            Ok(heroes_report(&hero_stats, &matches, &catalog.data, (self.clock)()))
        })
        .await
    }

    /// Role distribution, with lane data recovered from up to
    /// [`MAX_ENRICHED_MATCHES`] parsed matches.
    pub async fn roles(&self, account: AccountId) -> Result<Cached<RoleBreakdown>, AnalyticsError> {
        self.cached(keys::player_roles(account), keys::ttl::ROLES, || async move {
            let matches = self.history(account, HISTORY_LIMIT).await?;
            if matches.is_empty() {
                return Ok(RoleBreakdown::empty());
            }
            let matches = self.enrich_lanes(matches).await;
            Ok(role_breakdown(&matches))
        })
        .await
    }

    pub async fn trends(
        &self,
        account: AccountId,
        limit: u32,
    ) -> Result<Cached<TrendsReport>, AnalyticsError> {
        self.cached(keys::player_trends(account, limit), keys::ttl::TRENDS, || async move {
            let matches = self.history(account, limit).await?;
            Ok(build_trends(&matches))
        })
        .await
    }

    /// Day-of-week by hour grid, UTC.
    pub async fn heatmap(
        &self,
        account: AccountId,
    ) -> Result<Cached<Vec<HeatmapCell>>, AnalyticsError> {
        self.cached(keys::heatmap(account), keys::ttl::HEATMAP, || async move {
            let matches = self.history(account, HEATMAP_LIMIT).await?;
            Ok(build_heatmap(&matches))
        })
        .await
    }

    pub async fn peers(&self, account: AccountId) -> Result<Cached<PeersReport>, AnalyticsError> {
        self.cached(keys::player_peers(account), keys::ttl::PEERS, || async move {
            let peers = self.client.get_player_peers(account).await?;
            let matches = self.history(account, HISTORY_LIMIT).await?;
            Ok(peer_synergy(&peers, &matches))
        })
        .await
    }

    /// Today's games (UTC), or yesterday's when none were played today.
    pub async fn session(&self, account: AccountId) -> Result<Cached<SessionSummary>, AnalyticsError> {
        self.cached(keys::session(account), keys::ttl::SESSION, || async move {
            let matches = self.history(account, RECENT_LIMIT).await?;
            Ok(session_summary(&matches, (self.clock)()))
        })
        .await
    }

    /// Estimated MMR over the last year, newest match first.
    ///
    /// Starts from the profile's estimate, or [`DEFAULT_MMR`](stats::mmr::DEFAULT_MMR)
    /// when the profile has none or cannot be fetched.
    pub async fn mmr_history(&self, account: AccountId) -> Result<Cached<Vec<MmrPoint>>, AnalyticsError> {
        self.cached(keys::mmr(account), keys::ttl::PLAYER, || async move {
            let current = match self.client.get_player_profile(account).await {
                Ok(profile) => profile
                    .mmr_estimate
                    .and_then(|m| m.estimate)
                    .unwrap_or(stats::mmr::DEFAULT_MMR),
                Err(err) => {
                    tracing::warn!(error = %err, "profile unavailable, assuming default MMR");
                    stats::mmr::DEFAULT_MMR
                }
            };
            let matches = self.history(account, HISTORY_LIMIT).await?;
            Ok(mmr_history(
                &matches,
                current,
                (self.clock)(),
                stats::mmr::DEFAULT_PERIOD_DAYS,
            ))
        })
        .await
    }

    /// The player's record on one hero, or `None` if they never played it.
    pub async fn hero_detail(
        &self,
        account: AccountId,
        hero_id: u32,
    ) -> Result<Cached<Option<HeroDetail>>, AnalyticsError> {
        if hero_id == 0 {
            return Err(AnalyticsError::InvalidInput("hero id must be positive".to_string()));
        }
        let request = MatchesRequest::latest(HERO_DETAIL_LIMIT).hero(hero_id);
        self.cached(keys::player_hero(account, hero_id), keys::ttl::HEROES, || async move {
            let (hero_stats, matches, catalog) = try_join3(
                self.client.get_player_heroes(account),
                self.client.get_player_matches(account, &request),
                self.hero_catalog(),
            )
            .await?;
            let Some(hs) = hero_stats.iter().find(|h| h.hero_id == hero_id) else {
                return Ok(None);
            };
            let hero = hero_with_stats(hs, &matches, &catalog.data, (self.clock)());
            Ok(Some(hero_detail(hero, &matches)))
        })
        .await
    }

    /// Coaching insights.
    ///
    /// Hero totals, peers, recent matches and hero names each degrade to
    /// empty on their own failure. When totals, peers and matches all fail
    /// the first error is returned, so a previous report is served as stale.
    /// A report built from degraded inputs is never kept as the stale copy.
    pub async fn insights(&self, account: AccountId) -> Result<Cached<InsightsReport>, AnalyticsError> {
        self.cached_partial(keys::player_insights(account), keys::ttl::INSIGHTS, || async move {
            let inputs = join3(
                self.client.get_player_heroes(account),
                self.client.get_player_peers(account),
                self.history(account, RECENT_LIMIT),
            )
            .await;
            let (hero_stats, peers, matches) = match inputs {
                (Err(err), Err(_), Err(_)) => return Err(err),
                inputs => inputs,
            };

            let mut complete = hero_stats.is_ok() && peers.is_ok() && matches.is_ok();
            let hero_stats = or_empty(hero_stats, "hero totals");
            let peers = or_empty(peers, "peers");
            let matches = or_empty(matches, "matches");

            let names = match self.hero_names().await {
                Ok(names) => names,
                Err(err) => {
                    tracing::warn!(error = %err, "hero catalog unavailable, using ids");
                    complete = false;
                    HashMap::new()
                }
            };

            let data = aggregate_player_data(account, &hero_stats, &peers, &matches, &names);
            let report = generate_report(&data, &self.insight_config, (self.clock)());
            Ok((report, complete))
        })
        .await
    }

    /// Hero id to localized name.
    pub async fn hero_names(&self) -> Result<HashMap<u32, String>, AnalyticsError> {
        let catalog = self.hero_catalog().await?;
        Ok(catalog
            .data
            .into_iter()
            .map(|hero| (hero.id, hero.localized_name))
            .collect())
    }

    /// The hero catalog, cached for a day.
    pub async fn hero_catalog(&self) -> Result<Cached<Vec<Hero>>, AnalyticsError> {
        self.cached(keys::heroes_data(), keys::ttl::HEROES_DATA, || self.client.get_heroes())
            .await
    }

    pub async fn live_games(&self) -> Result<Cached<Vec<LiveGame>>, AnalyticsError> {
        self.cached(keys::live(), keys::ttl::LIVE, || self.client.get_live_games())
            .await
    }

    /// Whether `account` appears in a currently listed live game.
    pub async fn live_status(&self, account: AccountId) -> Result<LiveStatus, AnalyticsError> {
        let games = self.live_games().await?.into_inner();
        let game = games.into_iter().find(|g| g.has_player(account.get()));
        let hero_id = game.as_ref().and_then(|g| {
            g.players
                .iter()
                .find(|p| p.account_id == Some(account.get()))
                .map(|p| p.hero_id)
        });
        Ok(LiveStatus {
            is_live: game.is_some(),
            game,
            hero_id,
        })
    }

    pub async fn pro_players(&self) -> Result<Cached<Vec<ProPlayer>>, AnalyticsError> {
        self.cached(keys::pros(), keys::ttl::PROS, || self.client.get_pro_players())
            .await
    }

    /// Search players by name. Blank terms are rejected before any lookup.
    pub async fn search(&self, term: &str) -> Result<Cached<Vec<SearchResult>>, AnalyticsError> {
        let term = crate::opendota::validate_search_term(term)?;
        self.cached(keys::search(term), keys::ttl::SEARCH, || self.client.search_players(term))
            .await
    }

    /// Drop every cached response for `account` so the next call refetches.
    ///
    /// Stale copies are kept. Returns how many keys the durable store
    /// confirmed deleting.
    pub async fn refresh(&self, account: AccountId) -> usize {
        let mut targets = keys::player_keys(account);
        targets.push(keys::player_matches(account, 1));
        targets.push(keys::player_trends(account, DEFAULT_TREND_LIMIT));

        let mut deleted = 0;
        for key in &targets {
            if self.cache.delete(key).await {
                deleted += 1;
            }
        }
        tracing::debug!(%account, keys = targets.len(), deleted, "player cache cleared");
        deleted
    }

    async fn history(&self, account: AccountId, limit: u32) -> Result<Vec<MatchRecord>, AnalyticsError> {
        self.client
            .get_player_matches(account, &MatchesRequest::latest(limit))
            .await
    }

    /// Overlay lane data from full match details onto parsed matches.
    ///
    /// Detail lookups that fail are skipped.
    async fn enrich_lanes(&self, matches: Vec<MatchRecord>) -> Vec<MatchRecord> {
        let parsed: Vec<(u64, u8)> = matches
            .iter()
            .filter(|m| m.is_parsed())
            .take(MAX_ENRICHED_MATCHES)
            .map(|m| (m.match_id, m.player_slot))
            .collect();

        let details = join_all(
            parsed
                .iter()
                .map(|&(match_id, _)| self.client.get_match(match_id.into())),
        )
        .await;

        let mut lanes: HashMap<u64, MatchRecord> = HashMap::new();
        for (&(match_id, slot), detail) in parsed.iter().zip(details) {
            match detail {
                Ok(detail) => {
                    if let Some(player) = detail.player_in_slot(slot) {
                        lanes.insert(match_id, player.clone());
                    }
                }
                Err(err) => tracing::warn!(match_id, error = %err, "match detail unavailable"),
            }
        }

        matches
            .into_iter()
            .map(|mut record| {
                if let Some(player) = lanes.get(&record.match_id) {
                    record.lane_role = player.lane_role;
                    record.lane = player.lane;
                    record.is_roaming = player.is_roaming;
                    if player.gold_per_min > 0 {
                        record.gold_per_min = player.gold_per_min;
                    }
                }
                record
            })
            .collect()
    }

    /// Read-through on `key`; on an upstream failure serve the stale copy.
    async fn cached<T, F, Fut>(
        &self,
        key: String,
        ttl_secs: u64,
        fetch: F,
    ) -> Result<Cached<T>, AnalyticsError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AnalyticsError>>,
    {
        self.cached_partial(key, ttl_secs, || async move {
            Ok::<_, AnalyticsError>((fetch().await?, true))
        })
        .await
    }

    /// Like [`cached`](Self::cached), but `fetch` also reports whether every
    /// input was available. Incomplete results are cached under `key` only.
    async fn cached_partial<T, F, Fut>(
        &self,
        key: String,
        ttl_secs: u64,
        fetch: F,
    ) -> Result<Cached<T>, AnalyticsError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(T, bool), AnalyticsError>>,
    {
        let stale_key = keys::stale(&key);
        let result = self
            .cache
            .get_or_fetch(&key, ttl_secs, || async {
                let (data, complete) = fetch().await?;
                if complete {
                    self.cache.set(&stale_key, &data, keys::ttl::STALE).await;
                } else {
                    tracing::debug!(key = %key, "partial result, keeping previous stale copy");
                }
                Ok(data)
            })
            .await;

        match result {
            Err(err) if err.is_upstream() => match self.cache.get(&stale_key).await {
                Some(data) => {
                    tracing::warn!(key = %key, error = %err, "serving stale data after upstream failure");
                    Ok(Cached::stale(data))
                }
                None => Err(err),
            },
            other => other,
        }
    }
}

impl<C: std::fmt::Debug, S: std::fmt::Debug> std::fmt::Debug for PlayerAnalytics<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerAnalytics")
            .field("client", &self.client)
            .field("cache", &self.cache)
            .field("insight_config", &self.insight_config)
            .finish()
    }
}

fn heroes_report(
    hero_stats: &[PlayerHeroStats],
    matches: &[MatchRecord],
    catalog: &[Hero],
    now: i64,
) -> HeroesReport {
    if hero_stats.is_empty() {
        return HeroesReport::default();
    }

    let mut heroes: Vec<HeroWithStats> = hero_stats
        .iter()
        .map(|hs| hero_with_stats(hs, matches, catalog, now))
        .collect();
    heroes.sort_by(|a, b| b.games.cmp(&a.games));

    let best_winrate = heroes
        .iter()
        .filter(|h| h.games >= MIN_GAMES_FOR_BEST_WINRATE)
        .fold(None::<&HeroWithStats>, |best, h| match best {
            Some(b) if h.winrate <= b.winrate => Some(b),
            _ => Some(h),
        })
        .cloned();
    let most_comfortable = heroes
        .iter()
        .fold(None::<&HeroWithStats>, |best, h| match best {
            Some(b) if h.comfort_score <= b.comfort_score => Some(b),
            _ => Some(h),
        })
        .cloned();

    HeroesReport {
        most_played: heroes.first().cloned(),
        best_winrate,
        most_comfortable,
        heroes,
    }
}

fn hero_with_stats(
    hs: &PlayerHeroStats,
    matches: &[MatchRecord],
    catalog: &[Hero],
    now: i64,
) -> HeroWithStats {
    let aggregate = HeroAggregate::from(hs);
    let info = catalog.iter().find(|h| h.id == hs.hero_id);
    let comfort = comfort_score(&aggregate, matches, now);
    HeroWithStats {
        hero_id: hs.hero_id,
        hero_name: info
            .map(|h| h.localized_name.clone())
            .unwrap_or_else(|| format!("Hero {}", hs.hero_id)),
        hero_icon: info.map(Hero::icon_url).unwrap_or_default(),
        games: hs.games,
        wins: hs.win,
        losses: hs.games.saturating_sub(hs.win),
        winrate: stats::round1(aggregate.winrate()),
        avg_kda: stats::round2(avg_kda(&aggregate, matches)),
        avg_gpm: avg_gpm(&aggregate, matches),
        comfort_score: comfort,
        comfort_label: ComfortLabel::from_score(comfort),
        last_played: hs.last_played,
    }
}

/// `matches` are the player's games on `hero`, newest first.
fn hero_detail(hero: HeroWithStats, matches: &[MatchRecord]) -> HeroDetail {
    let recent_matches: Vec<RecentMatch> = matches
        .iter()
        .filter(|m| m.hero_id == hero.hero_id)
        .take(HERO_RECENT_MATCHES)
        .map(|m| RecentMatch {
            match_id: m.match_id,
            hero_id: m.hero_id,
            result: if m.won() { MatchResult::Win } else { MatchResult::Lose },
            duration: m.duration,
            kills: m.kills,
            deaths: m.deaths,
            assists: m.assists,
            gpm: m.gold_per_min,
            xpm: m.xp_per_min,
            kda: stats::round2(m.kda()),
            start_time: m.start_time,
            lane_role: m.lane_role,
        })
        .collect();

    let durations = |result: MatchResult| {
        recent_matches
            .iter()
            .filter(|m| m.result == result)
            .map(|m| m.duration)
            .collect::<Vec<u32>>()
    };
    let trends = HeroTrends {
        kda_over_time: recent_matches.iter().rev().map(|m| m.kda).collect(),
        win_durations: durations(MatchResult::Win),
        loss_durations: durations(MatchResult::Lose),
    };

    HeroDetail {
        hero,
        recent_matches,
        trends,
    }
}

fn or_empty<T>(result: Result<Vec<T>, AnalyticsError>, what: &'static str) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "{what} unavailable, continuing without");
        Vec::new()
    })
}

fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

//! Cache key builders and TTL presets.

use crate::types::AccountId;

/// TTL presets, in seconds.
pub mod ttl {
    /// Player profile.
    pub const PLAYER: u64 = 300;
    /// A page of match history.
    pub const MATCHES: u64 = 120;
    /// Per-hero totals.
    pub const HEROES: u64 = 600;
    pub const PEERS: u64 = 300;
    /// Professional player listing.
    pub const PROS: u64 = 3600;
    /// Hero catalog; changes only with game patches.
    pub const HEROES_DATA: u64 = 86_400;
    pub const INSIGHTS: u64 = 150;
    pub const TRENDS: u64 = 900;
    pub const HEATMAP: u64 = 900;
    pub const ROLES: u64 = 300;
    pub const SESSION: u64 = 300;
    pub const SEARCH: u64 = 300;
    pub const LIVE: u64 = 60;
    /// Last known good copy, served only when the upstream fails.
    pub const STALE: u64 = 86_400;
}

/// Key prefixes.
pub mod prefix {
    pub const PLAYER: &str = "player:";
    pub const PLAYER_MATCHES: &str = "player:matches:";
    pub const PLAYER_HEROES: &str = "player:heroes:";
    pub const PLAYER_PEERS: &str = "player:peers:";
    pub const PLAYER_ROLES: &str = "player:roles:";
    pub const PLAYER_TRENDS: &str = "player:trends:";
    pub const PLAYER_INSIGHTS: &str = "player:insights:";
    pub const PLAYER_HERO: &str = "player:hero:";
    pub const MMR: &str = "mmr:";
    pub const HEATMAP: &str = "heatmap:";
    pub const SESSION: &str = "session:";
    pub const HEROES_DATA: &str = "heroes:data:";
    pub const PROS: &str = "pros:";
    pub const SEARCH: &str = "search:";
    pub const LIVE: &str = "live:";
    pub const STALE: &str = "stale:";
}

pub fn player(account: AccountId) -> String {
    format!("{}{account}", prefix::PLAYER)
}

/// One page of match history (pages start at 1).
pub fn player_matches(account: AccountId, page: u32) -> String {
    format!("{}{account}:{page}", prefix::PLAYER_MATCHES)
}

pub fn player_heroes(account: AccountId) -> String {
    format!("{}{account}", prefix::PLAYER_HEROES)
}

pub fn player_peers(account: AccountId) -> String {
    format!("{}{account}", prefix::PLAYER_PEERS)
}

pub fn player_roles(account: AccountId) -> String {
    format!("{}{account}", prefix::PLAYER_ROLES)
}

/// Trends over the last `limit` matches.
pub fn player_trends(account: AccountId, limit: u32) -> String {
    format!("{}{account}:{limit}", prefix::PLAYER_TRENDS)
}

pub fn player_insights(account: AccountId) -> String {
    format!("{}{account}", prefix::PLAYER_INSIGHTS)
}

/// Detail for a single hero in the player's pool.
pub fn player_hero(account: AccountId, hero_id: u32) -> String {
    format!("{}{account}:{hero_id}", prefix::PLAYER_HERO)
}

pub fn mmr(account: AccountId) -> String {
    format!("{}{account}", prefix::MMR)
}

pub fn heatmap(account: AccountId) -> String {
    format!("{}{account}", prefix::HEATMAP)
}

pub fn session(account: AccountId) -> String {
    format!("{}{account}", prefix::SESSION)
}

pub fn heroes_data() -> String {
    format!("{}all", prefix::HEROES_DATA)
}

pub fn pros() -> String {
    format!("{}all", prefix::PROS)
}

/// Search results; the term is lowercased so lookups are case-insensitive.
pub fn search(term: &str) -> String {
    format!("{}{}", prefix::SEARCH, term.trim().to_lowercase())
}

pub fn live() -> String {
    format!("{}all", prefix::LIVE)
}

/// Fallback copy of `key`.
pub fn stale(key: &str) -> String {
    format!("{}{key}", prefix::STALE)
}

/// Every single-valued key holding data for `account`.
///
/// Paged and parameterized keys (match pages, trend windows, hero details)
/// are not included; see [`player_matches`], [`player_trends`] and
/// [`player_hero`].
pub fn player_keys(account: AccountId) -> Vec<String> {
    vec![
        player(account),
        player_heroes(account),
        player_peers(account),
        player_roles(account),
        player_insights(account),
        mmr(account),
        heatmap(account),
        session(account),
    ]
}

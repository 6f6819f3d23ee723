//! Typed records for OpenDota API responses.

use serde::{Deserialize, Serialize};

use crate::types::serde_helpers::{default_on_error, null_as_default, number_or_string};
use crate::types::{MatchId, Side};

/// Player profile (`/players/{account_id}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Steam profile block; absent for unknown or private accounts.
    #[serde(default)]
    pub profile: Option<SteamProfile>,
    /// Encoded rank medal (tens = medal, units = stars).
    #[serde(default, deserialize_with = "default_on_error::deserialize")]
    pub rank_tier: Option<u32>,
    /// Leaderboard position for immortal players.
    #[serde(default, deserialize_with = "default_on_error::deserialize")]
    pub leaderboard_rank: Option<u32>,
    /// Community MMR estimate.
    #[serde(default, deserialize_with = "default_on_error::deserialize")]
    pub mmr_estimate: Option<MmrEstimate>,
}

/// Steam account details embedded in a [`PlayerProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteamProfile {
    pub account_id: u32,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plus: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub cheese: u32,
    #[serde(default)]
    pub steamid: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub avatarfull: Option<String>,
    #[serde(default)]
    pub profileurl: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub loccountrycode: Option<String>,
}

/// MMR estimate block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MmrEstimate {
    #[serde(default)]
    pub estimate: Option<f64>,
}

/// One participant-perspective record of a completed match.
///
/// Returned by `/players/{id}/matches` and `/players/{id}/recentMatches`, and
/// embedded (one per player) in match details. Win/loss is never stored: use
/// [`MatchRecord::won`], which compares the side with the match outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: u64,
    /// 0-4 Radiant, 128-132 Dire.
    pub player_slot: u8,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub hero_id: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub kills: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub deaths: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub assists: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub gold_per_min: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub xp_per_min: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub last_hits: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub denies: u32,
    /// Coarse lane number, only on parsed matches.
    #[serde(default)]
    pub lane: Option<u8>,
    /// Detailed lane role (1-5), only on parsed matches.
    #[serde(default)]
    pub lane_role: Option<u8>,
    #[serde(default)]
    pub is_roaming: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub net_worth: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub hero_damage: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub tower_damage: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub hero_healing: u32,
    /// Duration in seconds.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub duration: u32,
    /// Unix seconds.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub start_time: i64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub radiant_win: bool,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub game_mode: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub lobby_type: u32,
    /// Parser version; `Some` means the match was parsed and has lane data upstream.
    #[serde(default)]
    pub version: Option<u32>,
}

impl MatchRecord {
    pub fn id(&self) -> MatchId {
        MatchId::new(self.match_id)
    }

    pub fn side(&self) -> Side {
        Side::from_slot(self.player_slot)
    }

    /// Whether this player won, derived from side and match outcome.
    pub fn won(&self) -> bool {
        self.side().won(self.radiant_win)
    }

    /// (kills + assists) / max(deaths, 1).
    pub fn kda(&self) -> f64 {
        crate::stats::kda(self.kills, self.deaths, self.assists)
    }

    pub fn is_parsed(&self) -> bool {
        self.version.is_some()
    }
}

/// Full match details (`/matches/{match_id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetail {
    pub match_id: u64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub radiant_win: bool,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub duration: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub start_time: i64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub game_mode: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub lobby_type: u32,
    #[serde(default)]
    pub players: Vec<MatchRecord>,
}

impl MatchDetail {
    /// Find the participant occupying `slot`.
    pub fn player_in_slot(&self, slot: u8) -> Option<&MatchRecord> {
        self.players.iter().find(|p| p.player_slot == slot)
    }
}

/// Per-hero totals for a player (`/players/{id}/heroes`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerHeroStats {
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub hero_id: u32,
    /// Unix seconds of the last game on this hero.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub last_played: i64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub games: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub win: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub with_games: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub with_win: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub against_games: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub against_win: u32,
}

/// A player seen alongside the requested player (`/players/{id}/peers`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerStats {
    pub account_id: u32,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub last_played: i64,
    /// Games played on the same team.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub games: u32,
    /// Wins on the same team.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub win: u32,
}

/// Hero catalog entry (`/heroes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub name: String,
    pub localized_name: String,
    #[serde(default)]
    pub primary_attr: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub legs: u32,
}

const HERO_ICON_BASE: &str =
    "https://cdn.cloudflare.steamstatic.com/apps/dota2/images/dota_react/heroes";

impl Hero {
    /// Internal name without the `npc_dota_hero_` prefix.
    pub fn short_name(&self) -> &str {
        self.name
            .strip_prefix("npc_dota_hero_")
            .unwrap_or(&self.name)
    }

    pub fn icon_url(&self) -> String {
        format!("{HERO_ICON_BASE}/{}.png", self.short_name())
    }
}

/// A game currently in progress (`/live`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveGame {
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub players: Vec<LivePlayer>,
    #[serde(default, deserialize_with = "default_on_error::deserialize")]
    pub radiant_team: Option<LiveTeam>,
    #[serde(default, deserialize_with = "default_on_error::deserialize")]
    pub dire_team: Option<LiveTeam>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub league_id: u32,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub activate_time: i64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub radiant_score: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub dire_score: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub game_mode: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub average_mmr: u32,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub lobby_type: u32,
}

impl LiveGame {
    /// Whether `account_id` is one of the players in this game.
    pub fn has_player(&self, account_id: u32) -> bool {
        self.players.iter().any(|p| p.account_id == Some(account_id))
    }
}

/// Participant in a [`LiveGame`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivePlayer {
    #[serde(default)]
    pub account_id: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub hero_id: u32,
    #[serde(default)]
    pub team: Option<u8>,
}

/// Team block in a [`LiveGame`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveTeam {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_tag: Option<String>,
}

/// Professional player listing (`/proPlayers`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProPlayer {
    pub account_id: u32,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub fantasy_role: Option<u8>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_tag: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub is_pro: bool,
}

/// Player search hit (`/search`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub account_id: u32,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub avatarfull: Option<String>,
    #[serde(default)]
    pub last_match_time: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

/// Query parameters for `/players/{id}/matches`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchesRequest {
    /// Number of matches to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of matches to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Only matches on this hero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_id: Option<u32>,
    /// Comma-separated list of extra fields to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl MatchesRequest {
    /// Request the most recent `limit` matches.
    pub fn latest(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn hero(mut self, hero_id: u32) -> Self {
        self.hero_id = Some(hero_id);
        self
    }

    /// Ask for additional fields (e.g. `lane_role`, `hero_damage`).
    pub fn project<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.project = (!joined.is_empty()).then_some(joined);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_record_nulls_and_outcome() {
        let json = serde_json::json!({
            "match_id": 7_000_000_001u64,
            "player_slot": 130,
            "hero_id": 74,
            "kills": 10,
            "deaths": 0,
            "assists": 5,
            "gold_per_min": 650,
            "hero_damage": null,
            "lane_role": null,
            "start_time": 1_700_000_000,
            "duration": 2400,
            "radiant_win": false,
            "version": null
        });

        let record: MatchRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.side(), Side::Dire);
        assert!(record.won());
        assert_eq!(record.hero_damage, 0);
        assert_eq!(record.lane_role, None);
        assert!(!record.is_parsed());
        assert_eq!(record.kda(), 15.0);
    }

    #[test]
    fn test_hero_icon_url() {
        let hero: Hero = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "npc_dota_hero_antimage",
            "localized_name": "Anti-Mage",
            "legs": null
        }))
        .unwrap();
        assert_eq!(hero.short_name(), "antimage");
        assert!(hero.icon_url().ends_with("/heroes/antimage.png"));
    }

    #[test]
    fn test_matches_request_query() {
        let request = MatchesRequest::latest(100)
            .hero(1)
            .project(["lane_role", "hero_damage"]);
        let query = serde_urlencoded::to_string(&request).unwrap();
        assert_eq!(query, "limit=100&hero_id=1&project=lane_role%2Chero_damage");
    }

    #[test]
    fn test_empty_project_is_skipped() {
        let request = MatchesRequest::latest(5).project(Vec::<String>::new());
        assert_eq!(serde_urlencoded::to_string(&request).unwrap(), "limit=5");
    }
}

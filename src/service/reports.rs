//! Response payloads assembled by [`PlayerAnalytics`](super::PlayerAnalytics).

use serde::{Deserialize, Serialize};

use crate::opendota::LiveGame;
use crate::stats::ComfortLabel;

/// A hero from the player's pool with comfort metrics attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroWithStats {
    pub hero_id: u32,
    pub hero_name: String,
    /// Empty when the hero is missing from the catalog.
    pub hero_icon: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percent, one decimal.
    pub winrate: f64,
    pub avg_kda: f64,
    pub avg_gpm: u32,
    pub comfort_score: u32,
    pub comfort_label: ComfortLabel,
    pub last_played: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroesReport {
    /// Most played first.
    pub heroes: Vec<HeroWithStats>,
    pub most_played: Option<HeroWithStats>,
    /// Highest winrate among heroes with at least five games.
    pub best_winrate: Option<HeroWithStats>,
    pub most_comfortable: Option<HeroWithStats>,
}

/// One of the player's matches on a specific hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMatch {
    pub match_id: u64,
    pub hero_id: u32,
    pub result: MatchResult,
    /// Seconds.
    pub duration: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gpm: u32,
    pub xpm: u32,
    pub kda: f64,
    pub start_time: i64,
    pub lane_role: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Lose,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroTrends {
    /// Oldest first.
    pub kda_over_time: Vec<f64>,
    pub win_durations: Vec<u32>,
    pub loss_durations: Vec<u32>,
}

/// Everything known about the player on one hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroDetail {
    pub hero: HeroWithStats,
    /// Newest first, at most twenty.
    pub recent_matches: Vec<RecentMatch>,
    pub trends: HeroTrends,
}

/// Whether a player is in one of the games listed by `/live`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveStatus {
    pub is_live: bool,
    pub game: Option<LiveGame>,
    /// Hero the player is on, when live.
    pub hero_id: Option<u32>,
}

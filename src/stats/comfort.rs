//! Hero comfort score.
//!
//! A 0-100 blend of how much, how well, how recently and how consistently a
//! hero has been played:
//!
//! | component   | weight | value                                        |
//! |-------------|--------|----------------------------------------------|
//! | games       | 0.30   | `min(games / 100, 1) * 100`                  |
//! | winrate     | 0.35   | `wins / games * 100`                         |
//! | recency     | 0.15   | `max(0, 100 - days_since_last * 100 / 30)`   |
//! | consistency | 0.20   | `max(0, 100 - stddev(per-match KDA) * 20)`   |

use serde::{Deserialize, Serialize};

use super::{HeroAggregate, mean, std_dev};
use crate::opendota::MatchRecord;

const SECONDS_PER_DAY: f64 = 86_400.0;

pub const GAMES_FOR_FULL_SCORE: u32 = 100;

/// Comfort score for `hero`, given the player's recent matches and the
/// current Unix time.
///
/// Only matches on the hero count toward consistency. Returns 0 when the
/// hero has no games or none of `matches` are on it.
pub fn comfort_score(hero: &HeroAggregate, matches: &[MatchRecord], now: i64) -> u32 {
    let kdas: Vec<f64> = hero.matches_in(matches).map(MatchRecord::kda).collect();
    if kdas.is_empty() || hero.games == 0 {
        return 0;
    }

    let games_score = games_score(hero.games);
    let winrate_score = f64::from(hero.wins) / f64::from(hero.games) * 100.0;

    let days_since = (now - hero.last_played) as f64 / SECONDS_PER_DAY;
    let recency_score = (100.0 - days_since * (100.0 / 30.0)).max(0.0);

    let consistency_score = (100.0 - std_dev(&kdas) * 20.0).max(0.0);

    let score = (games_score * 0.30
        + winrate_score * 0.35
        + recency_score * 0.15
        + consistency_score * 0.20)
        .round();

    score.clamp(0.0, 100.0) as u32
}

/// Experience component; saturates at [`GAMES_FOR_FULL_SCORE`] games.
fn games_score(games: u32) -> f64 {
    (f64::from(games) / f64::from(GAMES_FOR_FULL_SCORE)).min(1.0) * 100.0
}

/// Mean KDA over the hero's matches; 0 when there are none.
pub fn avg_kda(hero: &HeroAggregate, matches: &[MatchRecord]) -> f64 {
    let kdas: Vec<f64> = hero.matches_in(matches).map(MatchRecord::kda).collect();
    mean(&kdas)
}

/// Mean GPM over the hero's matches, rounded; 0 when there are none.
pub fn avg_gpm(hero: &HeroAggregate, matches: &[MatchRecord]) -> u32 {
    let gpms: Vec<f64> = hero
        .matches_in(matches)
        .map(|m| f64::from(m.gold_per_min))
        .collect();
    mean(&gpms).round() as u32
}

/// Comfort bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLabel {
    /// 80 and up
    Master,
    /// 60-79
    Comfort,
    /// 40-59
    Practice,
    /// Below 40
    Learning,
}

impl ComfortLabel {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => ComfortLabel::Master,
            60..=79 => ComfortLabel::Comfort,
            40..=59 => ComfortLabel::Practice,
            _ => ComfortLabel::Learning,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComfortLabel::Master => "Master",
            ComfortLabel::Comfort => "Comfort",
            ComfortLabel::Practice => "Practice",
            ComfortLabel::Learning => "Learning",
        }
    }
}

impl std::fmt::Display for ComfortLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

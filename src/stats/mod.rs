//! Derived metrics over batches of match records.
//!
//! Everything here is a pure function of its inputs. Win/loss is always
//! recomputed from the player's side and the match outcome (see
//! [`MatchRecord::won`](crate::opendota::MatchRecord::won)), and every
//! percentage is clamped to `[0, 100]`.

pub mod comfort;
pub mod heatmap;
pub mod heroes;
pub mod mmr;
pub mod peers;
pub mod roles;
pub mod session;
pub mod trends;

pub use comfort::{ComfortLabel, avg_gpm, avg_kda, comfort_score};
pub use heatmap::{HeatmapCell, build_heatmap};
pub use heroes::{HeroAggregate, aggregate_heroes};
pub use mmr::{MmrPoint, mmr_history};
pub use peers::{PeerSynergy, PeersReport, peer_synergy};
pub use roles::{
    RoleBreakdown, RoleRecommendation, RoleStats, detect_role, role_breakdown, role_recommendation,
    versatility_score,
};
pub use session::{SessionSummary, session_summary};
pub use trends::{StreakKind, TrendsReport, build_trends};

use crate::opendota::MatchRecord;

/// (kills + assists) / max(deaths, 1).
pub fn kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    f64::from(kills + assists) / f64::from(deaths.max(1))
}

/// Win percentage in `[0, 100]`; zero games give 0.
pub fn winrate(wins: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    (f64::from(wins) / f64::from(games) * 100.0).clamp(0.0, 100.0)
}

/// Wins in a batch, derived from side and outcome.
pub fn count_wins(matches: &[MatchRecord]) -> u32 {
    matches.iter().filter(|m| m.won()).count() as u32
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kda_zero_deaths() {
        assert_eq!(kda(10, 0, 5), 15.0);
        assert_eq!(kda(3, 3, 3), 2.0);
        assert_eq!(kda(0, 0, 0), 0.0);
    }

    #[test]
    fn test_winrate_bounds() {
        assert_eq!(winrate(0, 0), 0.0);
        assert_eq!(winrate(3, 4), 75.0);
        assert_eq!(winrate(5, 4), 100.0);
    }

    #[test]
    fn test_std_dev_population() {
        assert_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round2(1.005_1), 1.01);
    }
}

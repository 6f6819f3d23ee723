//! Estimated MMR history, walked back from the current estimate.

use serde::{Deserialize, Serialize};

use super::session::MMR_PER_GAME;
use crate::opendota::MatchRecord;

/// Assumed MMR when the profile has no estimate.
pub const DEFAULT_MMR: f64 = 2500.0;

/// History window in days.
pub const DEFAULT_PERIOD_DAYS: i64 = 365;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MmrPoint {
    /// Unix seconds.
    pub timestamp: i64,
    /// Estimated MMR before this match; never negative.
    pub mmr: f64,
    /// `+30` for a win, `-30` for a loss, `0` for the placeholder point.
    pub change: i32,
    /// `0` for the placeholder point.
    pub match_id: u64,
}

/// Reconstruct MMR over the last `days`, newest match first.
///
/// Each match undoes its own swing from the running estimate. When no match
/// falls inside the window every match is used; with no matches at all a
/// single point at `now` carries `current`.
pub fn mmr_history(matches: &[MatchRecord], current: f64, now: i64, days: i64) -> Vec<MmrPoint> {
    let cutoff = now - days * SECONDS_PER_DAY;
    let mut period: Vec<&MatchRecord> = matches.iter().filter(|m| m.start_time >= cutoff).collect();
    if period.is_empty() {
        period = matches.iter().collect();
    }
    if period.is_empty() {
        return vec![MmrPoint {
            timestamp: now,
            mmr: current,
            change: 0,
            match_id: 0,
        }];
    }

    period.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let mut estimate = current;
    period
        .into_iter()
        .map(|m| {
            let change = if m.won() { MMR_PER_GAME } else { -MMR_PER_GAME };
            estimate = (estimate - f64::from(change)).max(0.0);
            MmrPoint {
                timestamp: m.start_time,
                mmr: estimate,
                change,
                match_id: m.match_id,
            }
        })
        .collect()
}

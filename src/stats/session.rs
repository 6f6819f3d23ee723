//! Summary of the current play session.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{round1, winrate};
use crate::opendota::MatchRecord;

const SECONDS_PER_DAY: i64 = 86_400;

/// Estimated MMR swing per game.
pub const MMR_PER_GAME: i32 = 30;

/// Tilt score saturates at this many straight losses.
pub const MAX_TILT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub winrate: f64,
    /// `+30` per win, `-30` per loss.
    pub net_mmr: i32,
    /// Seconds, rounded.
    pub avg_duration: u32,
    pub tilt_score: u32,
    /// UTC hour with the most games.
    pub peak_hour: u8,
    pub best_hero: Option<u32>,
    pub worst_hero: Option<u32>,
    /// Start time of the most recent match in the batch, session or not.
    pub last_match_time: Option<i64>,
}

/// Summarize the games played since UTC midnight of `now`.
///
/// When nothing was played today the previous UTC day is used instead. An
/// empty session reports the current UTC hour as its peak hour.
pub fn session_summary(matches: &[MatchRecord], now: i64) -> SessionSummary {
    let today = now - now.rem_euclid(SECONDS_PER_DAY);
    let yesterday = today - SECONDS_PER_DAY;

    let mut session: Vec<&MatchRecord> =
        matches.iter().filter(|m| m.start_time >= today).collect();
    if session.is_empty() {
        session = matches
            .iter()
            .filter(|m| m.start_time >= yesterday && m.start_time < today)
            .collect();
    }

    let last_match_time = matches.iter().map(|m| m.start_time).max();

    if session.is_empty() {
        return SessionSummary {
            total_matches: 0,
            wins: 0,
            losses: 0,
            winrate: 0.0,
            net_mmr: 0,
            avg_duration: 0,
            tilt_score: 0,
            peak_hour: utc_hour(now),
            best_hero: None,
            worst_hero: None,
            last_match_time,
        };
    }

    let total = session.len() as u32;
    let wins = session.iter().filter(|m| m.won()).count() as u32;
    let losses = total - wins;

    let total_duration: u64 = session.iter().map(|m| u64::from(m.duration)).sum();
    let avg_duration = (total_duration as f64 / f64::from(total)).round() as u32;

    let (best_hero, worst_hero) = best_and_worst_hero(&session);

    SessionSummary {
        total_matches: total,
        wins,
        losses,
        winrate: round1(winrate(wins, total)),
        net_mmr: (wins as i32 - losses as i32) * MMR_PER_GAME,
        avg_duration,
        tilt_score: tilt_score(&session),
        peak_hour: peak_hour(&session),
        best_hero,
        worst_hero,
        last_match_time,
    }
}

/// Losses in a row, most recent first.
fn tilt_score(session: &[&MatchRecord]) -> u32 {
    let mut recent = session.to_vec();
    recent.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    recent
        .iter()
        .take_while(|m| !m.won())
        .take(MAX_TILT as usize)
        .count() as u32
}

fn peak_hour(session: &[&MatchRecord]) -> u8 {
    let mut counts = [0u32; 24];
    for m in session {
        counts[usize::from(utc_hour(m.start_time))] += 1;
    }
    let max = counts.iter().copied().max().unwrap_or(0);
    counts.iter().position(|&c| c == max).unwrap_or(0) as u8
}

// Strict comparisons: the first hero seen keeps a tie.
fn best_and_worst_hero(session: &[&MatchRecord]) -> (Option<u32>, Option<u32>) {
    let mut heroes: Vec<(u32, u32, u32)> = Vec::new();
    for m in session {
        let won = u32::from(m.won());
        match heroes.iter_mut().find(|(id, _, _)| *id == m.hero_id) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 += won;
            }
            None => heroes.push((m.hero_id, 1, won)),
        }
    }

    let mut best: Option<(u32, f64)> = None;
    let mut worst: Option<(u32, f64)> = None;
    for (hero_id, games, wins) in heroes {
        let rate = winrate(wins, games);
        if best.is_none_or(|(_, b)| rate > b) {
            best = Some((hero_id, rate));
        }
        if worst.is_none_or(|(_, w)| rate < w) {
            worst = Some((hero_id, rate));
        }
    }
    (best.map(|(id, _)| id), worst.map(|(id, _)| id))
}

fn utc_hour(unix: i64) -> u8 {
    OffsetDateTime::from_unix_timestamp(unix)
        .map(|dt| dt.hour())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::game;

    // 2024-03-14 15:00:00 UTC
    const NOW: i64 = 1_710_428_400;
    const MIDNIGHT: i64 = 1_710_374_400;

    #[test]
    fn test_today_session() {
        let mut matches = vec![
            game(1, 10, true, MIDNIGHT + 3_600),
            game(2, 10, false, MIDNIGHT + 7_200),
            game(3, 20, false, MIDNIGHT + 7_500),
            game(4, 30, true, MIDNIGHT - 100),
        ];
        for m in &mut matches {
            m.duration = 2_000;
        }
        matches[1].duration = 2_001;

        let summary = session_summary(&matches, NOW);
        assert_eq!(summary.total_matches, 3);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.winrate, 33.3);
        assert_eq!(summary.net_mmr, -30);
        assert_eq!(summary.avg_duration, 2_000);
        assert_eq!(summary.tilt_score, 2);
        assert_eq!(summary.peak_hour, 2);
        assert_eq!(summary.best_hero, Some(10));
        assert_eq!(summary.worst_hero, Some(20));
        assert_eq!(summary.last_match_time, Some(MIDNIGHT + 7_500));
    }

    #[test]
    fn test_falls_back_to_yesterday() {
        let matches = vec![
            game(1, 10, true, MIDNIGHT - 3_600),
            game(2, 10, true, MIDNIGHT - 2 * SECONDS_PER_DAY),
        ];
        let summary = session_summary(&matches, NOW);
        assert_eq!(summary.total_matches, 1);
        assert_eq!(summary.net_mmr, 30);
        assert_eq!(summary.peak_hour, 23);
    }

    #[test]
    fn test_tilt_caps_at_three() {
        let matches: Vec<_> = (0..5)
            .map(|i| game(i, 1, false, MIDNIGHT + i as i64 * 60))
            .collect();
        assert_eq!(session_summary(&matches, NOW).tilt_score, MAX_TILT);
    }

    #[test]
    fn test_empty_session() {
        let summary = session_summary(&[game(1, 1, true, 0)], NOW);
        assert_eq!(summary.total_matches, 0);
        assert_eq!(summary.winrate, 0.0);
        assert_eq!(summary.peak_hour, 15);
        assert_eq!(summary.best_hero, None);
        assert_eq!(summary.last_match_time, Some(0));
    }
}

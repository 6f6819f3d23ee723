//! Performance trends over a match batch.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{round1, round2, winrate};
use crate::opendota::MatchRecord;

/// Games per rolling-average window.
pub const ROLLING_WINDOW: usize = 20;

/// One game, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based position in the chronological sequence.
    pub game_number: u32,
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub gpm: u32,
    pub xpm: u32,
    pub kda: f64,
    pub won: bool,
    pub hero_damage: u32,
    pub tower_damage: u32,
    /// Seconds.
    pub duration: u32,
}

/// Averages over the trailing [`ROLLING_WINDOW`] games at each point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingAverages {
    pub gpm: Vec<u32>,
    pub kda: Vec<f64>,
    /// Percent, one decimal.
    pub winrate: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub total_games: u32,
    pub avg_gpm: u32,
    pub avg_kda: f64,
    pub overall_winrate: f64,
    pub total_wins: u32,
    pub total_losses: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Streaks {
    pub longest_win_streak: u32,
    pub longest_loss_streak: u32,
    /// Length of the streak the most recent game belongs to.
    pub current_streak: u32,
    pub current_streak_kind: StreakKind,
}

impl Streaks {
    pub fn current_win_streak(&self) -> u32 {
        if self.current_streak_kind == StreakKind::Win {
            self.current_streak
        } else {
            0
        }
    }

    pub fn current_loss_streak(&self) -> u32 {
        if self.current_streak_kind == StreakKind::Loss {
            self.current_streak
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    pub highest_kda: f64,
    pub highest_gpm: u32,
    /// Seconds.
    pub longest_game: u32,
    /// Seconds; 0 when there are no wins.
    pub shortest_win: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsReport {
    pub trends: Vec<TrendPoint>,
    pub rolling_averages: RollingAverages,
    pub summary: TrendSummary,
    pub streaks: Streaks,
    pub records: Records,
    /// Winrate over the most recent [`ROLLING_WINDOW`] games, one decimal.
    pub recent_winrate: f64,
}

/// Build trends from a match batch in any order.
pub fn build_trends(matches: &[MatchRecord]) -> TrendsReport {
    if matches.is_empty() {
        return TrendsReport::default();
    }

    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by_key(|m| m.start_time);

    let mut trends = Vec::with_capacity(ordered.len());
    let mut streaks = Streaks::default();
    let mut records = Records::default();
    let mut shortest_win: Option<u32> = None;
    let (mut wins, mut total_gpm, mut total_kda) = (0u32, 0u64, 0.0f64);

    for (index, record) in ordered.iter().enumerate() {
        let won = record.won();
        let kda = record.kda();

        if won {
            wins += 1;
        }
        streaks.push(won);

        total_gpm += u64::from(record.gold_per_min);
        total_kda += kda;

        records.highest_kda = records.highest_kda.max(kda);
        records.highest_gpm = records.highest_gpm.max(record.gold_per_min);
        records.longest_game = records.longest_game.max(record.duration);
        if won {
            shortest_win = Some(shortest_win.map_or(record.duration, |s| s.min(record.duration)));
        }

        trends.push(TrendPoint {
            game_number: index as u32 + 1,
            date: utc_date(record.start_time),
            gpm: record.gold_per_min,
            xpm: record.xp_per_min,
            kda,
            won,
            hero_damage: record.hero_damage,
            tower_damage: record.tower_damage,
            duration: record.duration,
        });
    }

    records.highest_kda = round2(records.highest_kda);
    records.shortest_win = shortest_win.unwrap_or(0);

    let total = ordered.len() as u32;
    let recent = &trends[trends.len().saturating_sub(ROLLING_WINDOW)..];
    let recent_wins = recent.iter().filter(|t| t.won).count() as u32;

    TrendsReport {
        rolling_averages: rolling_averages(&trends),
        summary: TrendSummary {
            total_games: total,
            avg_gpm: (total_gpm as f64 / f64::from(total)).round() as u32,
            avg_kda: round2(total_kda / f64::from(total)),
            overall_winrate: round1(winrate(wins, total)),
            total_wins: wins,
            total_losses: total - wins,
        },
        streaks,
        records,
        recent_winrate: round1(winrate(recent_wins, recent.len() as u32)),
        trends,
    }
}

impl Streaks {
    fn push(&mut self, won: bool) {
        let kind = if won { StreakKind::Win } else { StreakKind::Loss };
        if self.current_streak_kind == kind {
            self.current_streak += 1;
        } else {
            self.current_streak_kind = kind;
            self.current_streak = 1;
        }

        match kind {
            StreakKind::Win => {
                self.longest_win_streak = self.longest_win_streak.max(self.current_streak)
            }
            StreakKind::Loss => {
                self.longest_loss_streak = self.longest_loss_streak.max(self.current_streak)
            }
            StreakKind::None => {}
        }
    }
}

fn rolling_averages(trends: &[TrendPoint]) -> RollingAverages {
    let mut averages = RollingAverages::default();

    for end in 1..=trends.len() {
        let window = &trends[end.saturating_sub(ROLLING_WINDOW)..end];
        let len = window.len() as f64;

        let gpm = window.iter().map(|t| f64::from(t.gpm)).sum::<f64>() / len;
        let kda = window.iter().map(|t| t.kda).sum::<f64>() / len;
        let wins = window.iter().filter(|t| t.won).count() as u32;

        averages.gpm.push(gpm.round() as u32);
        averages.kda.push(round2(kda));
        averages.winrate.push(round1(winrate(wins, window.len() as u32)));
    }

    averages
}

fn utc_date(unix_seconds: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix_seconds)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
        .date()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::game;

    fn played(id: u64, won: bool, start: i64, gpm: u32, duration: u32) -> MatchRecord {
        MatchRecord {
            gold_per_min: gpm,
            duration,
            kills: 4,
            deaths: 2,
            assists: 2,
            ..game(id, 1, won, start)
        }
    }

    #[test]
    fn test_streaks_and_summary() {
        // Newest first, as the API returns them.
        let results = [true, true, true, false, false, true, false];
        let matches: Vec<_> = results
            .iter()
            .enumerate()
            .map(|(i, &won)| played(i as u64, won, 1_000 - i as i64, 500, 1800))
            .collect();

        let report = build_trends(&matches);
        assert_eq!(report.summary.total_games, 7);
        assert_eq!(report.summary.total_wins, 4);
        assert_eq!(report.summary.total_losses, 3);
        assert_eq!(report.summary.overall_winrate, 57.1);
        assert_eq!(report.streaks.longest_win_streak, 3);
        assert_eq!(report.streaks.longest_loss_streak, 2);
        assert_eq!(report.streaks.current_streak, 3);
        assert_eq!(report.streaks.current_streak_kind, StreakKind::Win);
        assert_eq!(report.streaks.current_win_streak(), 3);
        assert_eq!(report.streaks.current_loss_streak(), 0);

        // Chronological: oldest game first.
        assert!(!report.trends[0].won);
        assert_eq!(report.trends[6].game_number, 7);
    }

    #[test]
    fn test_records() {
        let matches = vec![
            played(1, true, 10, 400, 2400),
            played(2, false, 20, 700, 3600),
            played(3, true, 30, 550, 1500),
        ];

        let records = build_trends(&matches).records;
        assert_eq!(records.highest_gpm, 700);
        assert_eq!(records.longest_game, 3600);
        assert_eq!(records.shortest_win, 1500);
        assert_eq!(records.highest_kda, 3.0);
    }

    #[test]
    fn test_no_wins_shortest_is_zero() {
        let matches = vec![played(1, false, 10, 400, 2400)];
        assert_eq!(build_trends(&matches).records.shortest_win, 0);
    }

    #[test]
    fn test_rolling_window_and_recent() {
        // 25 games: first 5 lost, last 20 won.
        let matches: Vec<_> = (0..25)
            .map(|i| played(i, i >= 5, i as i64, 100 * (i as u32 % 2), 1000))
            .collect();

        let report = build_trends(&matches);
        assert_eq!(report.rolling_averages.winrate.len(), 25);
        assert_eq!(report.rolling_averages.winrate[0], 0.0);
        assert_eq!(report.rolling_averages.winrate[24], 100.0);
        assert_eq!(report.rolling_averages.winrate[19], 75.0);
        assert_eq!(report.recent_winrate, 100.0);
        assert_eq!(report.rolling_averages.gpm[1], 50);
    }

    #[test]
    fn test_utc_date() {
        assert_eq!(utc_date(1_700_000_000), "2023-11-14");
        assert_eq!(build_trends(&[]), TrendsReport::default());
    }
}

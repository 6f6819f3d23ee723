//! Example: Coaching insights from canned match data.
//!
//! Run with: cargo run --example insights

use std::collections::HashMap;

use dota_analytics::AccountId;
use dota_analytics::insights::{InsightConfig, aggregate_player_data, generate_report};
use dota_analytics::opendota::{MatchRecord, PeerStats, PlayerHeroStats};

// 2024-03-14 15:00:00 UTC
const NOW: i64 = 1_710_428_400;

fn main() {
    let account = AccountId::new(86_745_912);

    let hero_stats = vec![
        PlayerHeroStats {
            hero_id: 74,
            games: 80,
            win: 52,
            last_played: NOW - 3_600,
            ..PlayerHeroStats::default()
        },
        PlayerHeroStats {
            hero_id: 1,
            games: 25,
            win: 9,
            last_played: NOW - 86_400,
            ..PlayerHeroStats::default()
        },
    ];

    let peers = vec![PeerStats {
        account_id: 111_620_041,
        personaname: Some("support main".to_string()),
        avatar: None,
        last_played: NOW - 7_200,
        games: 30,
        win: 24,
    }];

    // Newest first; the last six are wins, so the player is on a streak.
    let matches: Vec<MatchRecord> = (0..40u64)
        .map(|i| MatchRecord {
            match_id: 7_600_000_000 - i,
            hero_id: if i % 3 == 0 { 1 } else { 74 },
            player_slot: 0,
            radiant_win: i < 6 || i % 2 == 0,
            kills: 8,
            deaths: 4,
            assists: 12,
            gold_per_min: 540,
            duration: 2_300,
            start_time: NOW - i as i64 * 5_400,
            lane_role: Some(if i % 4 == 0 { 3 } else { 2 }),
            ..MatchRecord::default()
        })
        .collect();

    let names = HashMap::from([(74, "Invoker".to_string()), (1, "Anti-Mage".to_string())]);

    let data = aggregate_player_data(account, &hero_stats, &peers, &matches, &names);
    println!(
        "Overall: {:.1}% over {} games",
        data.winrate, data.total_games
    );

    let report = generate_report(&data, &InsightConfig::default(), NOW);
    for insight in &report.insights {
        println!(
            "[{:?}] {} {}",
            insight.category,
            insight.title,
            insight.metric.as_deref().unwrap_or("")
        );
    }

    println!("Rating: {}/100", report.summary.overall_rating);
    println!("Strength: {}", report.summary.main_strength);
    println!("Weakness: {}", report.summary.main_weakness);
    println!("Tip: {}", report.summary.quick_tip);
}

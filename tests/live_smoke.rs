use dota_analytics::AccountId;
use dota_analytics::config::AnalyticsConfig;
use dota_analytics::opendota::OpenDotaClient;
use dota_analytics::service::PlayerAnalytics;
use tracing_subscriber::EnvFilter;

const KNOWN_ACCOUNT: u32 = 86_745_912;

fn live_tests_enabled() -> bool {
    std::env::var("OPENDOTA_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
#[ignore]
async fn live_public_endpoints_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let client = OpenDotaClient::new();
    let heroes = client.get_heroes().await?;
    assert!(heroes.len() > 100);
    assert!(heroes.iter().all(|h| !h.icon_url().contains("npc_dota_hero_")));

    let profile = client
        .get_player_profile(AccountId::new(KNOWN_ACCOUNT))
        .await?;
    assert!(profile.profile.is_some());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_analytics_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    // Works with or without a reachable Redis.
    let analytics = PlayerAnalytics::from_config(&AnalyticsConfig::from_env()?);
    let account = AccountId::new(KNOWN_ACCOUNT);

    let roles = analytics.roles(account).await?;
    assert_eq!(
        roles.data.total_count,
        roles.data.unknown_count + roles.data.roles.iter().map(|r| r.games).sum::<u32>()
    );

    let insights = analytics.insights(account).await?;
    assert!(insights.data.summary.overall_rating <= 100);

    Ok(())
}

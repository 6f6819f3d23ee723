//! OpenDota REST API client implementation.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AnalyticsError, UpstreamError};
use crate::opendota::endpoints::{self, OPENDOTA_BASE_URL};
use crate::opendota::traits::StatsApi;
use crate::opendota::types::{
    Hero, LiveGame, MatchDetail, MatchRecord, MatchesRequest, PeerStats, PlayerHeroStats,
    PlayerProfile, ProPlayer, SearchResult,
};
use crate::types::{AccountId, MatchId};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The OpenDota REST API client.
///
/// Performs exactly one HTTP GET per call and never retries. It does not
/// throttle on its own; wrap it in a
/// [`RateLimitedClient`](crate::rate_limit::RateLimitedClient) to stay within
/// the API quota.
///
/// # Example
///
/// ```rust,no_run
/// use dota_analytics::opendota::OpenDotaClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = OpenDotaClient::new();
///     let heroes = client.get_heroes().await?;
///     println!("{} heroes", heroes.len());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct OpenDotaClient {
    http_client: ClientWithMiddleware,
    base_url: String,
}

impl OpenDotaClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> OpenDotaClientBuilder {
        OpenDotaClientBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request.
    pub(crate) async fn get<T>(&self, endpoint: &str) -> Result<T, AnalyticsError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send(&url).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_params<T, Q>(
        &self,
        endpoint: &str,
        params: &Q,
    ) -> Result<T, AnalyticsError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query_string = serde_urlencoded::to_string(params)
            .map_err(|e| AnalyticsError::InvalidInput(e.to_string()))?;
        let url = if query_string.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query_string)
        };
        self.send(&url).await
    }

    async fn send<T>(&self, url: &str) -> Result<T, AnalyticsError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(classify_transport)?;
        self.parse_response(response).await
    }

    /// Parse a response from the OpenDota API.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, AnalyticsError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if !status.is_success() {
            let message = status.canonical_reason().unwrap_or("Unknown error");
            tracing::warn!(status = status.as_u16(), url = %response.url(), "upstream request failed");
            return Err(AnalyticsError::Upstream(UpstreamError::new(
                status.as_u16(),
                message,
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            AnalyticsError::InvalidResponse(format!("Failed to parse response: {e}"))
        })
    }

    /// Get a player's profile.
    pub async fn get_player_profile(
        &self,
        account: AccountId,
    ) -> Result<PlayerProfile, AnalyticsError> {
        self.get(&endpoints::player(account)).await
    }

    /// Get a page of a player's match history.
    pub async fn get_player_matches(
        &self,
        account: AccountId,
        request: &MatchesRequest,
    ) -> Result<Vec<MatchRecord>, AnalyticsError> {
        self.get_with_params(&endpoints::player_matches(account), request)
            .await
    }

    /// Get a player's last 20 matches.
    pub async fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> Result<Vec<MatchRecord>, AnalyticsError> {
        self.get(&endpoints::player_recent_matches(account)).await
    }

    /// Get a player's per-hero totals.
    pub async fn get_player_heroes(
        &self,
        account: AccountId,
    ) -> Result<Vec<PlayerHeroStats>, AnalyticsError> {
        self.get(&endpoints::player_heroes(account)).await
    }

    /// Get the players seen alongside a player.
    pub async fn get_player_peers(
        &self,
        account: AccountId,
    ) -> Result<Vec<PeerStats>, AnalyticsError> {
        self.get(&endpoints::player_peers(account)).await
    }

    /// Get full details for one match.
    pub async fn get_match(&self, match_id: MatchId) -> Result<MatchDetail, AnalyticsError> {
        self.get(&endpoints::match_detail(match_id)).await
    }

    /// Get the hero catalog.
    pub async fn get_heroes(&self) -> Result<Vec<Hero>, AnalyticsError> {
        self.get(endpoints::HEROES).await
    }

    /// Get games currently in progress.
    pub async fn get_live_games(&self) -> Result<Vec<LiveGame>, AnalyticsError> {
        self.get(endpoints::LIVE).await
    }

    /// Get the professional player listing.
    pub async fn get_pro_players(&self) -> Result<Vec<ProPlayer>, AnalyticsError> {
        self.get(endpoints::PRO_PLAYERS).await
    }

    /// Search players by persona name.
    ///
    /// A blank term is rejected without contacting the API.
    pub async fn search_players(&self, term: &str) -> Result<Vec<SearchResult>, AnalyticsError> {
        let term = validate_search_term(term)?;
        self.get_with_params(endpoints::SEARCH, &[("term", term)])
            .await
    }
}

impl Default for OpenDotaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OpenDotaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenDotaClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Trim a search term, rejecting blank input.
pub(crate) fn validate_search_term(term: &str) -> Result<&str, AnalyticsError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(AnalyticsError::InvalidInput(
            "Search term must not be empty".to_string(),
        ));
    }
    Ok(term)
}

fn classify_transport(err: reqwest_middleware::Error) -> AnalyticsError {
    match err {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => AnalyticsError::Timeout,
        other => other.into(),
    }
}

/// Builder for [`OpenDotaClient`].
pub struct OpenDotaClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    timeout: Duration,
}

impl OpenDotaClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: OPENDOTA_BASE_URL.to_string(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> OpenDotaClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("dota-analytics/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("dota-analytics"));
        headers.insert(USER_AGENT, header_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        OpenDotaClient {
            http_client: client,
            base_url: self.base_url,
        }
    }
}

impl Default for OpenDotaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsApi for OpenDotaClient {
    async fn get_player_profile(&self, account: AccountId) -> Result<PlayerProfile, AnalyticsError> {
        OpenDotaClient::get_player_profile(self, account).await
    }

    async fn get_player_matches(
        &self,
        account: AccountId,
        request: &MatchesRequest,
    ) -> Result<Vec<MatchRecord>, AnalyticsError> {
        OpenDotaClient::get_player_matches(self, account, request).await
    }

    async fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> Result<Vec<MatchRecord>, AnalyticsError> {
        OpenDotaClient::get_recent_matches(self, account).await
    }

    async fn get_player_heroes(
        &self,
        account: AccountId,
    ) -> Result<Vec<PlayerHeroStats>, AnalyticsError> {
        OpenDotaClient::get_player_heroes(self, account).await
    }

    async fn get_player_peers(&self, account: AccountId) -> Result<Vec<PeerStats>, AnalyticsError> {
        OpenDotaClient::get_player_peers(self, account).await
    }

    async fn get_match(&self, match_id: MatchId) -> Result<MatchDetail, AnalyticsError> {
        OpenDotaClient::get_match(self, match_id).await
    }

    async fn get_heroes(&self) -> Result<Vec<Hero>, AnalyticsError> {
        OpenDotaClient::get_heroes(self).await
    }

    async fn get_live_games(&self) -> Result<Vec<LiveGame>, AnalyticsError> {
        OpenDotaClient::get_live_games(self).await
    }

    async fn get_pro_players(&self) -> Result<Vec<ProPlayer>, AnalyticsError> {
        OpenDotaClient::get_pro_players(self).await
    }

    async fn search_players(&self, term: &str) -> Result<Vec<SearchResult>, AnalyticsError> {
        OpenDotaClient::search_players(self, term).await
    }
}

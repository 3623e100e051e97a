//! HTTP client for the Odds-API REST endpoints.

use crate::error::Error;
use crate::types::*;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;


/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://api2.odds-api.io/v3";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key used on authenticated endpoints.
    pub api_key: String,
    /// Base URL of the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default endpoint and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the Odds-API REST endpoints.
///
/// Authenticated endpoints carry the API key as an `apiKey` query
/// parameter; errors are classified by HTTP status (401 invalid key,
/// 429 rate limited, 404 not found).
#[derive(Debug, Clone)]
pub struct OddsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OddsApiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("odds-api-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client for the default endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: &str) -> Result<Self, Error> {
        Self::new(ClientConfig::new(api_key))
    }

    // ========================================================================
    // Sports & Leagues
    // ========================================================================

    /// Lists all available sports.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_sports(&self) -> Result<Vec<Sport>, Error> {
        self.request(Method::GET, "sports", None::<&()>, false).await
    }

    /// Lists leagues for a sport.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_leagues(&self, sport: &str) -> Result<Vec<League>, Error> {
        self.request(Method::GET, "leagues", Some(&[("sport", sport)]), true)
            .await
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Lists events matching the given filters.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_events(&self, params: &GetEventsParams) -> Result<Vec<Event>, Error> {
        self.request(Method::GET, "events", Some(params), true).await
    }

    /// Gets a specific event by id.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_event(&self, event_id: &str) -> Result<Event, Error> {
        self.request(Method::GET, &format!("events/{}", event_id), None::<&()>, true)
            .await
    }

    /// Lists events currently live for a sport.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_live_events(&self, sport: &str) -> Result<Vec<Event>, Error> {
        self.request(Method::GET, "events/live", Some(&[("sport", sport)]), true)
            .await
    }

    /// Searches events by keyword.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn search_events(&self, query: &str) -> Result<Vec<Event>, Error> {
        self.request(Method::GET, "events/search", Some(&[("query", query)]), true)
            .await
    }

    // ========================================================================
    // Odds
    // ========================================================================

    /// Gets current odds for an event at the given bookmakers.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_event_odds(&self, params: &GetOddsParams) -> Result<EventOdds, Error> {
        self.request(Method::GET, "odds", Some(params), true).await
    }

    /// Gets the historical movement of one market's odds.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_odds_movement(
        &self,
        params: &GetOddsMovementParams,
    ) -> Result<OddsMovement, Error> {
        self.request(Method::GET, "odds/movements", Some(params), true)
            .await
    }

    /// Gets odds for multiple events at once.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_multi_event_odds(
        &self,
        params: &GetMultiEventOddsParams,
    ) -> Result<Vec<EventOdds>, Error> {
        self.request(Method::GET, "odds/multi", Some(params), true).await
    }

    /// Gets odds updated since a given timestamp.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_updated_odds_since(
        &self,
        params: &GetUpdatedOddsSinceParams,
    ) -> Result<Vec<EventOdds>, Error> {
        self.request(Method::GET, "odds/updated", Some(params), true).await
    }

    // ========================================================================
    // Participants
    // ========================================================================

    /// Lists participants (teams/players) for a sport.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_participants(
        &self,
        params: &GetParticipantsParams,
    ) -> Result<Vec<Participant>, Error> {
        self.request(Method::GET, "participants", Some(params), true).await
    }

    /// Gets a specific participant by id.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_participant(&self, participant_id: i64) -> Result<Participant, Error> {
        self.request(
            Method::GET,
            &format!("participants/{}", participant_id),
            None::<&()>,
            true,
        )
        .await
    }

    // ========================================================================
    // Bookmakers
    // ========================================================================

    /// Lists all available bookmakers.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_bookmakers(&self) -> Result<Vec<Bookmaker>, Error> {
        self.request(Method::GET, "bookmakers", None::<&()>, false).await
    }

    /// Lists the bookmakers selected for this account.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_selected_bookmakers(&self) -> Result<Vec<Bookmaker>, Error> {
        self.request(Method::GET, "bookmakers/selected", None::<&()>, true)
            .await
    }

    /// Selects bookmakers for this account.
    ///
    /// # Arguments
    /// * `bookmakers` - Comma-joined bookmaker identifiers
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn select_bookmakers(&self, bookmakers: &str) -> Result<SuccessResponse, Error> {
        self.request(
            Method::PUT,
            "bookmakers/selected/select",
            Some(&[("bookmakers", bookmakers)]),
            true,
        )
        .await
    }

    /// Clears the bookmakers selected for this account.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn clear_selected_bookmakers(&self) -> Result<SuccessResponse, Error> {
        self.request(Method::PUT, "bookmakers/selected/clear", None::<&()>, true)
            .await
    }

    // ========================================================================
    // Betting analysis
    // ========================================================================

    /// Lists arbitrage opportunities across the given bookmakers.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_arbitrage_bets(
        &self,
        params: &GetArbitrageBetsParams,
    ) -> Result<Vec<ArbitrageBet>, Error> {
        self.request(Method::GET, "arbitrage-bets", Some(params), true).await
    }

    /// Lists value betting opportunities at one bookmaker.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_value_bets(
        &self,
        params: &GetValueBetsParams,
    ) -> Result<Vec<ValueBet>, Error> {
        self.request(Method::GET, "value-bets", Some(params), true).await
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    async fn request<T, P>(
        &self,
        method: Method,
        path: &str,
        params: Option<&P>,
        auth: bool,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let mut url = format!("{}/{}", self.base_url, path);

        let mut query = match params {
            Some(p) => serde_urlencoded::to_string(p).unwrap_or_default(),
            None => String::new(),
        };
        if auth {
            let key = serde_urlencoded::to_string([("apiKey", self.api_key.as_str())])
                .unwrap_or_default();
            if query.is_empty() {
                query = key;
            } else {
                query.push('&');
                query.push_str(&key);
            }
        }
        if !query.is_empty() {
            url.push_str(&format!("?{}", query));
        }

        let resp = self
            .client
            .request(method, &url)
            .send()
            .await
            .map_err(classify_transport)?;
        handle_response(resp).await
    }
}

/// Maps a reqwest transport failure onto the client error taxonomy.
fn classify_transport(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else {
        Error::Http(err)
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if status.is_success() {
        return resp.json().await.map_err(classify_transport);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(Error::InvalidApiKey),
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
        StatusCode::NOT_FOUND => {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::NotFound(text))
        }
        _ => {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

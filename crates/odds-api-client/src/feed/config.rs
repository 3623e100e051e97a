//! Feed connection parameters.

use crate::error::Error;
use std::time::Duration;
use url::Url;

/// Default streaming endpoint.
const DEFAULT_FEED_URL: &str = "wss://api.odds-api.io/v3/ws";

/// First reconnect delay.
const DEFAULT_RECONNECT_BASE: Duration = Duration::from_secs(1);

/// Upper bound on the reconnect delay.
const DEFAULT_RECONNECT_CAP: Duration = Duration::from_secs(30);

/// Scheduled retries before giving up.
const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Interval between keepalive pings.
const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Event status filter for the feed subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Only events currently in play.
    Live,
    /// Only events that have not started.
    Prematch,
}

impl FeedStatus {
    /// Wire value used in the connection URI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Prematch => "prematch",
        }
    }
}

impl std::fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters for [`OddsFeed`](crate::OddsFeed).
///
/// Filters are fixed for the lifetime of a connection; build a new
/// feed to change them.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// API key (secret; query-encoded into the connection URI).
    pub api_key: String,
    /// Markets to subscribe to (required, 1-20 entries).
    pub markets: Vec<String>,
    /// Sport filter (0-10 entries).
    pub sports: Vec<String>,
    /// League filter (0-20 entries).
    pub leagues: Vec<String>,
    /// Event status filter.
    pub status: Option<FeedStatus>,
    /// Streaming endpoint.
    pub url: String,
    /// Delay before the first reconnect attempt.
    pub reconnect_base_delay: Duration,
    /// Upper bound on the reconnect delay.
    pub reconnect_max_delay: Duration,
    /// Scheduled retries before the feed gives up.
    pub max_reconnect_attempts: u32,
    /// Interval between keepalive pings while the connection is open.
    pub keepalive_interval: Duration,
}

impl FeedConfig {
    /// Creates a configuration with the default endpoint and timings.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        markets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            markets: markets.into_iter().map(Into::into).collect(),
            sports: Vec::new(),
            leagues: Vec::new(),
            status: None,
            url: DEFAULT_FEED_URL.to_string(),
            reconnect_base_delay: DEFAULT_RECONNECT_BASE,
            reconnect_max_delay: DEFAULT_RECONNECT_CAP,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
        }
    }

    /// Checks filter cardinalities.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFilter`] if a filter is out of range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::InvalidFilter("apiKey must not be empty".to_string()));
        }
        if self.markets.is_empty() || self.markets.len() > 20 {
            return Err(Error::InvalidFilter(format!(
                "markets requires 1-20 entries, got {}",
                self.markets.len()
            )));
        }
        if self.sports.len() > 10 {
            return Err(Error::InvalidFilter(format!(
                "sport filter allows at most 10 entries, got {}",
                self.sports.len()
            )));
        }
        if self.leagues.len() > 20 {
            return Err(Error::InvalidFilter(format!(
                "league filter allows at most 20 entries, got {}",
                self.leagues.len()
            )));
        }
        Ok(())
    }

    /// Builds the connection URI, query-encoding the API key and each
    /// non-empty filter.
    ///
    /// # Errors
    /// Returns error if the endpoint URL does not parse.
    pub fn feed_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.url)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("apiKey", &self.api_key);
            query.append_pair("markets", &self.markets.join(","));
            if !self.sports.is_empty() {
                query.append_pair("sport", &self.sports.join(","));
            }
            if !self.leagues.is_empty() {
                query.append_pair("leagues", &self.leagues.join(","));
            }
            if let Some(status) = self.status {
                query.append_pair("status", status.as_str());
            }
        }
        Ok(url)
    }
}

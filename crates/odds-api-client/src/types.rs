//! Request and response types for the Odds-API REST endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;


/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Not started yet.
    Upcoming,
    /// Currently in play.
    Live,
    /// Final result known.
    Finished,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Live => write!(f, "live"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

// ============================================================================
// Sports & Leagues
// ============================================================================

/// A sport covered by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sport {
    /// Sport identifier (e.g. "basketball").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A league within a sport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    /// League identifier (e.g. "usa-nba").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Sport this league belongs to.
    pub sport: String,
    /// Country code, where applicable.
    pub country: Option<String>,
}

// ============================================================================
// Events & Participants
// ============================================================================

/// A team or player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Participant identifier.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Sport the participant competes in.
    pub sport: String,
    /// Country code, where applicable.
    pub country: Option<String>,
    /// Logo URL, where available.
    pub logo: Option<String>,
}

/// Reference to a participant within an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRef {
    /// Participant identifier.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
}

/// Current score of a live or finished event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Score {
    /// Home side score.
    pub home: u32,
    /// Away side score.
    pub away: u32,
}

/// A single real-world sporting fixture tracked by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event identifier.
    pub id: String,
    /// Sport identifier.
    pub sport: String,
    /// League name.
    pub league: String,
    /// League identifier.
    pub league_id: String,
    /// Scheduled start time (ISO 8601).
    pub start_time: String,
    /// Lifecycle status, where known.
    pub status: Option<EventStatus>,
    /// Home side.
    pub home_participant: ParticipantRef,
    /// Away side.
    pub away_participant: ParticipantRef,
    /// Current score, for live/finished events.
    pub score: Option<Score>,
}

// ============================================================================
// Bookmakers
// ============================================================================

/// An odds-providing entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmaker {
    /// Bookmaker identifier (e.g. "bet365").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Website URL, where available.
    pub url: Option<String>,
}

/// Response to bookmaker selection updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Whether the operation was applied.
    pub success: bool,
}

// ============================================================================
// Markets & Odds
// ============================================================================

/// A market line / handicap value. The API returns it either as a
/// number or as formatted text (e.g. "+1.5/2").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarketLine {
    /// Plain numeric line.
    Number(f64),
    /// Formatted line text.
    Text(String),
}

/// Prices for the outcomes of a market at a point in time.
///
/// Two-way markets leave `draw` unset; totals use `over`/`under`
/// instead of the side outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    /// Home outcome price.
    #[serde(default, deserialize_with = "price", skip_serializing_if = "Option::is_none")]
    pub home: Option<f64>,
    /// Draw outcome price.
    #[serde(default, deserialize_with = "price", skip_serializing_if = "Option::is_none")]
    pub draw: Option<f64>,
    /// Away outcome price.
    #[serde(default, deserialize_with = "price", skip_serializing_if = "Option::is_none")]
    pub away: Option<f64>,
    /// Over outcome price.
    #[serde(default, deserialize_with = "price", skip_serializing_if = "Option::is_none")]
    pub over: Option<f64>,
    /// Under outcome price.
    #[serde(default, deserialize_with = "price", skip_serializing_if = "Option::is_none")]
    pub under: Option<f64>,
    /// Handicap/line value, for spread and totals markets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdp: Option<MarketLine>,
    /// Maximum stake accepted by the bookmaker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A bettable market for an event, as quoted by one bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Market name (e.g. "ML", "Spread", "Totals").
    pub name: String,
    /// When the bookmaker last updated this market.
    pub updated_at: String,
    /// Quotes, in the order sent by the API.
    #[serde(default)]
    pub odds: Vec<OddsQuote>,
}

/// Odds for one event across the requested bookmakers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOdds {
    /// Event identifier.
    pub event_id: String,
    /// Bookmaker identifier mapped to the markets it currently quotes.
    #[serde(default)]
    pub bookmakers: HashMap<String, Vec<Market>>,
}

/// A historical price point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementPoint {
    /// Price at that time.
    pub odds: f64,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

/// Historical movement of a single market's odds at one bookmaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsMovement {
    /// Event identifier.
    pub event_id: String,
    /// Bookmaker identifier.
    pub bookmaker: String,
    /// Market name.
    pub market: String,
    /// Market line, where the market has one.
    pub market_line: Option<MarketLine>,
    /// Price points, oldest first.
    #[serde(default)]
    pub movements: Vec<MovementPoint>,
}

// ============================================================================
// Betting analysis
// ============================================================================

/// One leg of an arbitrage bet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageLeg {
    /// Outcome to back.
    pub outcome: String,
    /// Bookmaker quoting the price.
    pub bookmaker: String,
    /// Price of the leg.
    pub odds: f64,
    /// Suggested stake, where computed.
    pub stake: Option<f64>,
}

/// A cross-bookmaker arbitrage opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageBet {
    /// Event identifier.
    pub event_id: String,
    /// Market name.
    pub market: String,
    /// Market line, where the market has one.
    pub market_line: Option<MarketLine>,
    /// Guaranteed profit as a percentage of total stake.
    pub profit_percentage: f64,
    /// Legs to place.
    pub legs: Vec<ArbitrageLeg>,
    /// Event details, when requested.
    pub event: Option<Event>,
}

/// A price judged to be above fair value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueBet {
    /// Event identifier.
    pub event_id: String,
    /// Bookmaker quoting the price.
    pub bookmaker: String,
    /// Market name.
    pub market: String,
    /// Market line, where the market has one.
    pub market_line: Option<MarketLine>,
    /// Outcome to back.
    pub outcome: String,
    /// Quoted price.
    pub odds: f64,
    /// Estimated fair price.
    pub fair_odds: f64,
    /// Edge over fair value as a percentage.
    pub value_percentage: f64,
    /// Event details, when requested.
    pub event: Option<Event>,
}

// ============================================================================
// Request parameters
// ============================================================================

/// Parameters for [`OddsApiClient::list_events`](crate::OddsApiClient::list_events).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEventsParams {
    /// Sport identifier (required).
    pub sport: String,
    /// League identifier filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    /// Participant filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<i64>,
    /// Lifecycle status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    /// Start time lower bound (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Start time upper bound (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Only events quoted by this bookmaker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmaker: Option<String>,
}

/// Parameters for [`OddsApiClient::get_event_odds`](crate::OddsApiClient::get_event_odds).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOddsParams {
    /// Event identifier.
    pub event_id: String,
    /// Comma-joined bookmaker identifiers.
    pub bookmakers: String,
}

/// Parameters for [`OddsApiClient::get_odds_movement`](crate::OddsApiClient::get_odds_movement).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOddsMovementParams {
    /// Event identifier.
    pub event_id: String,
    /// Bookmaker identifier.
    pub bookmaker: String,
    /// Market name.
    pub market: String,
    /// Market line, for markets that have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_line: Option<MarketLine>,
}

/// Parameters for [`OddsApiClient::get_multi_event_odds`](crate::OddsApiClient::get_multi_event_odds).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMultiEventOddsParams {
    /// Comma-joined event identifiers.
    pub event_ids: String,
    /// Comma-joined bookmaker identifiers.
    pub bookmakers: String,
}

/// Parameters for [`OddsApiClient::get_updated_odds_since`](crate::OddsApiClient::get_updated_odds_since).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUpdatedOddsSinceParams {
    /// Unix timestamp in milliseconds.
    pub since: i64,
    /// Bookmaker identifier.
    pub bookmaker: String,
    /// Sport identifier.
    pub sport: String,
}

/// Parameters for [`OddsApiClient::list_participants`](crate::OddsApiClient::list_participants).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParticipantsParams {
    /// Sport identifier (required).
    pub sport: String,
    /// Name search query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Parameters for [`OddsApiClient::list_arbitrage_bets`](crate::OddsApiClient::list_arbitrage_bets).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetArbitrageBetsParams {
    /// Comma-joined bookmaker identifiers.
    pub bookmakers: String,
    /// Maximum number of opportunities to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Include full event details in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_event_details: Option<bool>,
}

/// Parameters for [`OddsApiClient::list_value_bets`](crate::OddsApiClient::list_value_bets).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetValueBetsParams {
    /// Bookmaker identifier.
    pub bookmaker: String,
    /// Include full event details in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_event_details: Option<bool>,
}

/// Accepts a price as a JSON number or a numeric string. The REST
/// endpoints send numbers; the stream encodes prices as strings.
fn price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

//! Integration tests for the Odds-API client.
//!
//! Tests run against in-process mock servers: an axum application
//! standing in for the REST API and a plain tokio-tungstenite listener
//! standing in for the streaming endpoint. No network access or real
//! API key is required.

use odds_api_client::{ClientConfig, FeedConfig, OddsApiClient};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::net::TcpListener;

/// API key accepted by the mock servers.
pub const TEST_API_KEY: &str = "test-key";

/// Installs the tracing subscriber once per test binary.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serves an axum router on an ephemeral port, returning its base URL.
pub async fn spawn_rest_server(app: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock REST server");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock REST server failed");
    });

    format!("http://{}", addr)
}

/// Creates a client pointed at a mock REST server.
#[must_use]
pub fn test_client(base_url: &str) -> OddsApiClient {
    OddsApiClient::new(ClientConfig {
        api_key: TEST_API_KEY.to_string(),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
    })
    .expect("failed to build client")
}

/// Binds an ephemeral listener for a mock feed server, returning it
/// together with its `ws://` URL.
pub async fn bind_feed_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock feed server");
    let addr = listener.local_addr().expect("no local addr");
    (listener, format!("ws://{}", addr))
}

/// Feed configuration with millisecond timings suitable for tests.
#[must_use]
pub fn test_feed_config(url: &str) -> FeedConfig {
    let mut config = FeedConfig::new(TEST_API_KEY, ["ML", "Spread"]);
    config.url = url.to_string();
    config.reconnect_base_delay = Duration::from_millis(20);
    config.reconnect_max_delay = Duration::from_millis(100);
    config.max_reconnect_attempts = 5;
    config.keepalive_interval = Duration::from_millis(200);
    config
}

/// Polls until `check` passes, panicking once the timeout elapses.
pub async fn wait_until<F>(timeout: Duration, mut check: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while !check() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached within {:?}",
            timeout
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// ============================================================================
// Wire fixtures
// ============================================================================

/// An event as returned by the REST `events` endpoint.
#[must_use]
pub fn event_json(id: &str, sport: &str) -> Value {
    json!({
        "id": id,
        "sport": sport,
        "league": "Test League",
        "leagueId": "test-league",
        "startTime": "2025-11-02T19:00:00Z",
        "status": "live",
        "homeParticipant": {"id": 1, "name": "Home"},
        "awayParticipant": {"id": 2, "name": "Away"}
    })
}

/// A market with a single two-way quote.
#[must_use]
pub fn market_json(name: &str) -> Value {
    json!({
        "name": name,
        "updatedAt": "2025-11-02T19:05:00Z",
        "odds": [{"home": "1.90", "away": "2.02", "max": 500}]
    })
}

/// A `welcome` feed record.
#[must_use]
pub fn welcome_frame() -> String {
    json!({
        "type": "welcome",
        "message": "connected",
        "timestamp": "2025-11-02T19:00:00Z"
    })
    .to_string()
}

/// A `created` feed record with one market.
#[must_use]
pub fn created_frame(event: &str, bookie: &str, market: &str) -> String {
    json!({
        "type": "created",
        "id": event,
        "bookie": bookie,
        "timestamp": "2025-11-02T19:01:00Z",
        "markets": [market_json(market)]
    })
    .to_string()
}

/// An `updated` feed record carrying the given markets.
#[must_use]
pub fn updated_frame(event: &str, bookie: &str, markets: &[&str]) -> String {
    let markets: Vec<Value> = markets.iter().map(|m| market_json(m)).collect();
    json!({
        "type": "updated",
        "id": event,
        "bookie": bookie,
        "timestamp": "2025-11-02T19:02:00Z",
        "markets": markets
    })
    .to_string()
}

/// A `deleted` feed record.
#[must_use]
pub fn deleted_frame(event: &str, bookie: &str) -> String {
    json!({
        "type": "deleted",
        "id": event,
        "bookie": bookie,
        "timestamp": "2025-11-02T19:03:00Z"
    })
    .to_string()
}

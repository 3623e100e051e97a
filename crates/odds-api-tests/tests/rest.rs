//! REST client behavior against a mock API server: request building,
//! API key forwarding and error classification by status.

use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::Router;
use odds_api_client::{ClientConfig, Error, GetEventsParams, GetOddsParams, OddsApiClient};
use odds_api_tests::{TEST_API_KEY, event_json, init_tracing, market_json, spawn_rest_server, test_client};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

fn authed(params: &HashMap<String, String>) -> bool {
    params.get("apiKey").map(String::as_str) == Some(TEST_API_KEY)
}

#[tokio::test]
async fn test_list_sports_is_unauthenticated() {
    init_tracing();

    async fn sports(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        // The sports listing carries no API key.
        if params.contains_key("apiKey") {
            return (StatusCode::BAD_REQUEST, "unexpected apiKey").into_response();
        }
        Json(json!([
            {"id": "basketball", "name": "Basketball"},
            {"id": "football", "name": "Football", "description": "Association football"}
        ]))
        .into_response()
    }

    let base = spawn_rest_server(Router::new().route("/sports", get(sports))).await;
    let client = test_client(&base);

    let sports = client.list_sports().await.expect("list_sports failed");

    assert_eq!(sports.len(), 2);
    assert_eq!(sports[0].id, "basketball");
    assert_eq!(sports[1].description.as_deref(), Some("Association football"));
}

#[tokio::test]
async fn test_api_key_and_filters_are_forwarded() {
    init_tracing();

    async fn events(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        if !authed(&params) {
            return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
        }
        if params.get("sport").map(String::as_str) != Some("basketball")
            || params.get("league").map(String::as_str) != Some("usa-nba")
            || params.get("status").map(String::as_str) != Some("live")
        {
            return (StatusCode::BAD_REQUEST, "missing filters").into_response();
        }
        Json(json!([event_json("62924717", "basketball")])).into_response()
    }

    let base = spawn_rest_server(Router::new().route("/events", get(events))).await;
    let client = test_client(&base);

    let events = client
        .list_events(&GetEventsParams {
            sport: "basketball".to_string(),
            league: Some("usa-nba".to_string()),
            status: Some(odds_api_client::EventStatus::Live),
            ..Default::default()
        })
        .await
        .expect("list_events failed");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "62924717");
}

#[tokio::test]
async fn test_event_odds_returns_bookmaker_map() {
    init_tracing();

    async fn odds(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        if !authed(&params) {
            return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
        }
        assert_eq!(params.get("eventId").map(String::as_str), Some("E1"));
        assert_eq!(params.get("bookmakers").map(String::as_str), Some("bet365,singbet"));
        Json(json!({
            "eventId": "E1",
            "bookmakers": {
                "bet365": [market_json("ML")],
                "singbet": [market_json("ML"), market_json("Spread")]
            }
        }))
        .into_response()
    }

    let base = spawn_rest_server(Router::new().route("/odds", get(odds))).await;
    let client = test_client(&base);

    let odds = client
        .get_event_odds(&GetOddsParams {
            event_id: "E1".to_string(),
            bookmakers: "bet365,singbet".to_string(),
        })
        .await
        .expect("get_event_odds failed");

    assert_eq!(odds.event_id, "E1");
    assert_eq!(odds.bookmakers["singbet"].len(), 2);
    assert_eq!(odds.bookmakers["bet365"][0].odds[0].home, Some(1.90));
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    init_tracing();

    async fn events() -> impl IntoResponse {
        (StatusCode::UNAUTHORIZED, "Invalid API key")
    }

    let base = spawn_rest_server(Router::new().route("/events", get(events))).await;
    let client = test_client(&base);

    let err = client
        .list_events(&GetEventsParams {
            sport: "basketball".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidApiKey));
}

#[tokio::test]
async fn test_too_many_requests_maps_to_rate_limited() {
    init_tracing();

    async fn bookmakers() -> impl IntoResponse {
        (StatusCode::TOO_MANY_REQUESTS, "slow down")
    }

    let base = spawn_rest_server(Router::new().route("/bookmakers", get(bookmakers))).await;
    let client = test_client(&base);

    let err = client.list_bookmakers().await.unwrap_err();

    assert!(matches!(err, Error::RateLimited));
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    init_tracing();

    async fn event() -> impl IntoResponse {
        (StatusCode::NOT_FOUND, "no such event")
    }

    let base = spawn_rest_server(Router::new().route("/events/{id}", get(event))).await;
    let client = test_client(&base);

    let err = client.get_event("missing").await.unwrap_err();

    match err {
        Error::NotFound(message) => assert_eq!(message, "no such event"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_other_statuses_map_to_api_error() {
    init_tracing();

    async fn sports() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }

    let base = spawn_rest_server(Router::new().route("/sports", get(sports))).await;
    let client = test_client(&base);

    let err = client.list_sports().await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_response_maps_to_timeout() {
    init_tracing();

    async fn sports() -> impl IntoResponse {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Json(json!([]))
    }

    let base = spawn_rest_server(Router::new().route("/sports", get(sports))).await;
    let client = OddsApiClient::new(ClientConfig {
        api_key: TEST_API_KEY.to_string(),
        base_url: base,
        timeout: Duration::from_millis(100),
    })
    .expect("failed to build client");

    let err = client.list_sports().await.unwrap_err();

    assert!(matches!(err, Error::Timeout(_)));
}

#[tokio::test]
async fn test_select_bookmakers_uses_put() {
    init_tracing();

    async fn select(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        if !authed(&params) {
            return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
        }
        assert_eq!(
            params.get("bookmakers").map(String::as_str),
            Some("bet365,singbet")
        );
        Json(json!({"success": true})).into_response()
    }

    let base = spawn_rest_server(
        Router::new().route("/bookmakers/selected/select", put(select)),
    )
    .await;
    let client = test_client(&base);

    let resp = client
        .select_bookmakers("bet365,singbet")
        .await
        .expect("select_bookmakers failed");

    assert!(resp.success);
}

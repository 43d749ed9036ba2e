//! Calendar route tests

mod support;

use axum::http::StatusCode;
use chrono::NaiveDate;
use hearth_domain::{Config, EventKind};
use serde_json::json;
use support::{app, get, post_json};

#[tokio::test]
async fn sync_without_token_is_local_only() {
    let (router, context) = app(Config::default());
    let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    context.local_events.add("Taco night", date, EventKind::Meal);

    let (status, body) = get(&router, "/api/calendar/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["synced"], false);

    let on_date = body["events"]["2026-09-01"].as_array().unwrap();
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0]["title"], "Taco night");
    assert_eq!(on_date[0]["source"], "local");
}

#[tokio::test]
async fn create_event_without_token_is_unavailable() {
    let (router, _) = app(Config::default());
    let (status, body) = post_json(
        &router,
        "/api/calendar/events",
        json!({
            "title": "Dinner",
            "start": "2026-09-02T18:00:00",
            "end": "2026-09-02T19:00:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_event_with_missing_fields_is_400() {
    let mut config = Config::default();
    config.google.access_token = Some("google-token".into());
    let (router, _) = app(config);

    let (status, body) =
        post_json(&router, "/api/calendar/events", json!({ "title": "Dinner" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn assistant_command_is_relayed_not_executed() {
    let (router, _) = app(Config::default());
    let (status, body) = post_json(
        &router,
        "/api/assistant/command",
        json!({ "command": "dim the living room lights" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["instructions"]
        .as_str()
        .unwrap()
        .contains("Say to your Google Home/Assistant: \"dim the living room lights\""));
}

#[tokio::test]
async fn assistant_phrases_device_actions() {
    let (router, _) = app(Config::default());
    let (status, body) = post_json(
        &router,
        "/api/assistant/command",
        json!({ "device": "kitchen lights", "action": "brightness", "value": "75" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"], "set the kitchen lights to 75%");
}

#[tokio::test]
async fn assistant_rejects_an_empty_body() {
    let (router, _) = app(Config::default());
    let (status, _) = post_json(&router, "/api/assistant/command", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

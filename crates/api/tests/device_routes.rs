//! Device listing and control route tests

mod support;

use axum::http::StatusCode;
use hearth_domain::Config;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{app, get, post_json};

#[tokio::test]
async fn shark_devices_fall_back_to_the_mock_robot() {
    let (router, _) = app(Config::default());
    let (status, body) = get(&router, "/api/shark/devices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "mock");
    assert_eq!(body["devices"].as_array().unwrap().len(), 1);
    assert_eq!(body["devices"][0]["online"], true);
    assert_eq!(body["devices"][0]["status"]["batteryLevel"], 85);
}

#[tokio::test]
async fn govee_without_key_lists_as_unconfigured() {
    let (router, _) = app(Config::default());
    let (status, body) = get(&router, "/api/govee/devices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "unconfigured");
    assert!(body["devices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn aidot_devices_come_from_configured_hosts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bulb-1",
            "name": "Desk Lamp",
            "state": { "on": true, "brightness": 80 }
        })))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.aidot.device_hosts = vec![server.uri().trim_start_matches("http://").to_string()];
    let (router, _) = app(config);

    let (status, body) = get(&router, "/api/aidot/devices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "live");
    assert_eq!(body["devices"][0]["name"], "Desk Lamp");
}

#[tokio::test]
async fn spotify_playback_falls_back_to_the_mock_state() {
    let (router, _) = app(Config::default());
    let (status, body) = get(&router, "/api/spotify/playback").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["playbackState"]["is_playing"], true);
    assert_eq!(body["playbackState"]["item"]["name"], "Blinding Lights");
    assert_eq!(body["playbackState"]["device"]["name"], "Kitchen Display");
}

#[tokio::test]
async fn spotify_devices_fall_back_to_the_mock_device() {
    let (router, _) = app(Config::default());
    let (status, body) = get(&router, "/api/spotify/devices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "mock");
    assert_eq!(body["devices"][0]["name"], "Kitchen Display");
}

#[tokio::test]
async fn dashboard_covers_every_category() {
    let (router, _) = app(Config::default());
    let (status, body) = get(&router, "/api/dashboard/devices").await;

    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_object().unwrap();
    for vendor in ["govee", "aidot", "hue", "shark", "spotify"] {
        assert_eq!(categories[vendor]["state"], "ready", "category {vendor}");
    }
}

#[tokio::test]
async fn unknown_vendor_is_404() {
    let (router, _) = app(Config::default());
    let (status, _) = get(&router, "/api/nest/devices").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn control_without_device_id_is_400_with_message() {
    let (router, _) = app(Config::default());
    let (status, body) =
        post_json(&router, "/api/govee/control", json!({ "action": "power", "value": true }))
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("deviceId"));
}

#[tokio::test]
async fn control_with_unknown_action_is_400() {
    let (router, _) = app(Config::default());
    let (status, body) = post_json(
        &router,
        "/api/shark/control",
        json!({ "deviceId": "SHARK123456", "action": "levitate" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("action"));
}

#[tokio::test]
async fn shark_control_without_token_succeeds_as_mock() {
    let (router, _) = app(Config::default());
    let (status, body) = post_json(
        &router,
        "/api/shark/control",
        json!({ "deviceId": "SHARK123456", "action": "start" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn wrong_method_on_control_is_405() {
    let (router, _) = app(Config::default());
    let (status, _) = get(&router, "/api/govee/control").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_reports_every_component() {
    let mut config = Config::default();
    config.govee.api_key = Some("key".into());
    let (router, _) = app(config);

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let vendors = body["vendors"].as_array().unwrap();
    assert_eq!(vendors.len(), 6);
    let govee = vendors.iter().find(|v| v["name"] == "govee").unwrap();
    assert_eq!(govee["configured"], true);
    let hue = vendors.iter().find(|v| v["name"] == "hue").unwrap();
    assert_eq!(hue["configured"], false);
}

//! HTTP routes
//!
//! Thin proxy layer: every handler parses the request, calls one core or
//! infra component, and maps the domain result onto a JSON response.
//! Control responses are `{success, message}`; vendor rejections come back
//! as `success: false` with a 200, while local failures get a 4xx/5xx.

pub mod assistant;
pub mod auth;
pub mod calendar;
pub mod devices;
pub mod health;
pub mod spotify;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hearth_domain::HearthError;
use serde_json::json;

use crate::context::AppContext;

/// Assemble the full application router.
pub fn build_router(context: AppContext) -> Router {
    let legacy_auth = context.config.spotify.legacy_auth;

    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/api/dashboard/devices", get(devices::dashboard))
        .route("/api/{vendor}/devices", get(devices::list))
        .route("/api/{vendor}/control", post(devices::control))
        .route("/api/hue/auth", get(auth::hue_auth))
        .route("/api/auth/callback/hue", get(auth::hue_callback))
        .route("/api/spotify/playback", get(spotify::playback))
        .route("/api/spotify/auth", get(spotify::auth))
        .route("/api/spotify/callback", get(spotify::callback))
        .route("/api/calendar/sync", get(calendar::sync))
        .route("/api/calendar/events", post(calendar::create_event))
        .route("/api/assistant/command", post(assistant::command));

    if legacy_auth {
        router = router
            .route("/api/spotify/exchange", get(spotify::exchange))
            .route("/api/spotify/simple-auth", get(spotify::simple_auth));
    }

    router.with_state(context)
}

/// Domain error carried out of a handler.
pub struct ApiError(pub HearthError);

impl From<HearthError> for ApiError {
    fn from(value: HearthError) -> Self {
        ApiError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HearthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            HearthError::Auth(_) => StatusCode::UNAUTHORIZED,
            HearthError::NotFound(_) => StatusCode::NOT_FOUND,
            HearthError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            HearthError::VendorRejected(_) | HearthError::Network(_) => StatusCode::BAD_GATEWAY,
            HearthError::Config(_) | HearthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "success": false,
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

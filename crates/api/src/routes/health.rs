//! Health endpoint
//!
//! Reports which vendors have working configuration without calling any of
//! them; "unconfigured" is a normal state, not a failure.

use axum::extract::State;
use axum::Json;
use hearth_domain::Vendor;
use serde::Serialize;

use crate::context::AppContext;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub vendors: Vec<ComponentHealth>,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub configured: bool,
}

/// `GET /health`
pub async fn health(State(context): State<AppContext>) -> Json<HealthReport> {
    let config = &context.config;
    let configured = |vendor: Vendor| match vendor {
        Vendor::Govee => config.govee.api_key.is_some(),
        Vendor::AiDot => !config.aidot.device_hosts.is_empty(),
        Vendor::Hue => context.credentials.is_configured(Vendor::Hue),
        Vendor::Shark => {
            context.credentials.is_configured(Vendor::Shark)
                || (config.shark.username.is_some() && config.shark.password.is_some())
        }
        Vendor::Spotify => {
            context.credentials.is_configured(Vendor::Spotify)
                || config.spotify.client_id.is_some()
        }
    };

    let mut vendors: Vec<ComponentHealth> = Vendor::ALL
        .into_iter()
        .map(|vendor| ComponentHealth {
            name: vendor.to_string(),
            configured: configured(vendor),
        })
        .collect();
    vendors.push(ComponentHealth {
        name: "google-calendar".to_string(),
        configured: config.google.access_token.is_some(),
    });

    Json(HealthReport { status: "ok", vendors })
}

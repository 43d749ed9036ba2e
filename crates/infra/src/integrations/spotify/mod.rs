//! Spotify Web API adapter
//!
//! Playback state and Connect-device control against `/me/player`. Without
//! a token the adapter serves a fixed mock playback state and device so the
//! music card renders; control calls still require a real token.

pub mod auth;

use std::sync::Arc;

use async_trait::async_trait;
use hearth_core::{CredentialStore, DeviceIntegration};
use hearth_domain::constants::SPOTIFY_API_BASE;
use hearth_domain::{
    mock_playback_state, CommandOutcome, CommandVerb, Device, DeviceCommand, DeviceListing,
    HearthError, Result, SpotifyDevice, SpotifyPlaybackState, Vendor,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::vendor_status_error;
use crate::http::HttpClient;

pub use auth::{parse_fragment_token, AuthFlow, SpotifyAuth};

pub struct SpotifyAdapter {
    http: HttpClient,
    credentials: Arc<CredentialStore>,
    api_base: String,
}

impl SpotifyAdapter {
    pub fn new(credentials: Arc<CredentialStore>) -> Result<Self> {
        Ok(Self { http: HttpClient::new()?, credentials, api_base: SPOTIFY_API_BASE.to_string() })
    }

    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn token(&self) -> Option<String> {
        self.credentials.token(Vendor::Spotify)
    }

    fn require_token(&self) -> Result<String> {
        self.token()
            .ok_or_else(|| HearthError::NotConfigured("no Spotify token; authorize first".into()))
    }

    fn player(&self, method: Method, endpoint: &str, token: &str) -> RequestBuilder {
        let url = format!("{}/me/player{endpoint}", self.api_base);
        self.http.request(method, &url).bearer_auth(token)
    }

    /// Current playback state. `Ok(None)` means nothing is playing (the
    /// vendor answers 204); no token gets the mock state.
    pub async fn playback_state(&self) -> Result<Option<SpotifyPlaybackState>> {
        let Some(token) = self.token() else {
            return Ok(Some(mock_playback_state()));
        };

        let response = self.http.send(self.player(Method::GET, "", &token)).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        let state = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse Spotify playback state: {err}"))
        })?;
        Ok(Some(state))
    }

    /// Start playback of one specific track on the active device.
    pub async fn play_track(&self, track_uri: &str) -> Result<CommandOutcome> {
        let token = self.require_token()?;
        let response = self
            .http
            .send(
                self.player(Method::PUT, "/play", &token)
                    .json(&json!({ "uris": [track_uri] })),
            )
            .await?;
        self.control_outcome(response, "play").await
    }

    async fn control_outcome(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> Result<CommandOutcome> {
        if response.status().is_success() {
            Ok(CommandOutcome::ok(format!("Successfully executed {action} command")))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(CommandOutcome::failed(vendor_status_error(status, &body).to_string()))
        }
    }
}

#[async_trait]
impl DeviceIntegration for SpotifyAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Spotify
    }

    async fn list_devices(&self) -> Result<DeviceListing> {
        let Some(token) = self.token() else {
            return Ok(DeviceListing::mock(vec![Device::Spotify(mock_playback_state().device)]));
        };

        let response = self.http.send(self.player(Method::GET, "/devices", &token)).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        let page: DevicesPage = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse Spotify device list: {err}"))
        })?;

        Ok(DeviceListing::live(page.devices.into_iter().map(Device::Spotify).collect()))
    }

    async fn send_command(&self, command: &DeviceCommand) -> Result<CommandOutcome> {
        let token = self.require_token()?;
        debug!(verb = ?command.verb, device = %command.target.device_id, "Spotify control");

        // Device-scoped verbs may target a specific Connect device; an
        // empty id means "whatever is active".
        let device_id = &command.target.device_id;
        let scoped = |request: RequestBuilder| {
            if device_id.is_empty() {
                request
            } else {
                request.query(&[("device_id", device_id.as_str())])
            }
        };

        let request = match command.verb {
            CommandVerb::Play => {
                scoped(self.player(Method::PUT, "/play", &token)).json(&json!({}))
            }
            CommandVerb::Pause => {
                scoped(self.player(Method::PUT, "/pause", &token)).json(&json!({}))
            }
            CommandVerb::Next => scoped(self.player(Method::POST, "/next", &token)),
            CommandVerb::Previous => scoped(self.player(Method::POST, "/previous", &token)),
            CommandVerb::Volume => {
                let percent = command.value.as_int().ok_or_else(|| {
                    HearthError::InvalidInput("volume command requires an integer value".into())
                })?;
                scoped(
                    self.player(Method::PUT, "/volume", &token)
                        .query(&[("volume_percent", percent.clamp(0, 100).to_string())]),
                )
            }
            CommandVerb::Transfer => self.player(Method::PUT, "", &token).json(&json!({
                "device_ids": [command.target.device_id],
                "play": true
            })),
            other => {
                return Err(HearthError::InvalidInput(format!(
                    "unsupported Spotify command: {other:?}"
                )))
            }
        };

        let response = self.http.send(request).await?;
        self.control_outcome(response, &format!("{:?}", command.verb)).await
    }
}

#[derive(Debug, Deserialize)]
struct DevicesPage {
    #[serde(default)]
    devices: Vec<SpotifyDevice>,
}

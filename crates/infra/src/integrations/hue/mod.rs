//! Philips Hue adapter (OAuth2 authorization-code, cloud bridge-proxy)
//!
//! Auth sequence: build an authorize URL, user consents out-of-band, the
//! callback route exchanges the code for a token, and the token lands in
//! the credential store. Token lifetime is not tracked; an expired token
//! just makes control calls fail until the user re-authorizes.
//!
//! The bridge-proxy reports brightness on a 0-254 scale; listing normalizes
//! it to 0-100 and control maps it back.

pub mod color;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use hearth_core::{CredentialStore, DeviceIntegration};
use hearth_domain::constants::{HUE_API_BASE, HUE_BRIGHTNESS_MAX, HUE_SCOPES};
use hearth_domain::{
    CommandOutcome, CommandVerb, Device, DeviceCommand, DeviceListing, HearthError, HueLight,
    Result, Vendor,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::errors::vendor_status_error;
use crate::http::HttpClient;

pub use color::rgb_to_xy;

pub struct HueAdapter {
    http: HttpClient,
    credentials: Arc<CredentialStore>,
    client_id: Option<String>,
    client_secret: Option<String>,
    api_base: String,
}

impl HueAdapter {
    pub fn new(
        credentials: Arc<CredentialStore>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            credentials,
            client_id,
            client_secret,
            api_base: HUE_API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn client_id(&self) -> Result<&str> {
        self.client_id
            .as_deref()
            .ok_or_else(|| HearthError::NotConfigured("HUE_CLIENT_ID is not set".into()))
    }

    /// Authorize URL for the browser redirect step.
    pub fn auth_url(&self, redirect_uri: &str) -> Result<String> {
        let mut url = Url::parse(&format!("{}/v2/oauth2/authorize", self.api_base))
            .map_err(|err| HearthError::Internal(format!("invalid Hue authorize URL: {err}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", self.client_id()?)
            .append_pair("response_type", "code")
            .append_pair("scope", HUE_SCOPES)
            .append_pair("redirect_uri", redirect_uri);
        Ok(url.to_string())
    }

    /// Exchange an authorization code for an access token
    /// (client-credentials-in-body form POST).
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String> {
        let client_id = self.client_id()?.to_string();
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or_else(|| HearthError::NotConfigured("HUE_CLIENT_SECRET is not set".into()))?;

        let url = format!("{}/v2/oauth2/token", self.api_base);
        let response = self
            .http
            .send(self.http.request(Method::POST, &url).form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret),
                ("redirect_uri", redirect_uri),
            ]))
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HearthError::Auth(format!("Hue token exchange failed ({status}): {body}")));
        }

        let token: TokenResponse = response.json().await.map_err(|err| {
            HearthError::Auth(format!("failed to parse Hue token response: {err}"))
        })?;
        Ok(token.access_token)
    }

    fn token(&self) -> Option<String> {
        self.credentials.token(Vendor::Hue)
    }
}

/// Map the bridge's native 0-254 brightness onto 0-100.
pub fn native_to_percent(raw: i64) -> i64 {
    ((raw as f64 / HUE_BRIGHTNESS_MAX as f64) * 100.0).round() as i64
}

/// Map a 0-100 percentage back onto the bridge's 0-254 scale.
pub fn percent_to_native(percent: i64) -> i64 {
    ((percent as f64 * HUE_BRIGHTNESS_MAX as f64) / 100.0).round() as i64
}

#[async_trait]
impl DeviceIntegration for HueAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Hue
    }

    async fn list_devices(&self) -> Result<DeviceListing> {
        let Some(token) = self.token() else {
            return Ok(DeviceListing::unconfigured());
        };

        let url = format!("{}/route/api/0/lights", self.api_base);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::GET, &url)
                    .bearer_auth(&token)
                    .header("hue-application-key", &token),
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        // The bridge returns a map keyed by light id. BTreeMap keeps the
        // listing order stable across polls.
        let lights: BTreeMap<String, RawLight> = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse Hue light list: {err}"))
        })?;

        let devices = lights
            .into_iter()
            .map(|(id, light)| {
                Device::Hue(HueLight {
                    name: light.name.unwrap_or_else(|| format!("Light {id}")),
                    archetype: light.kind.unwrap_or_else(|| "light".to_string()),
                    on: light.state.as_ref().map(|s| s.on.unwrap_or(false)).unwrap_or(false),
                    brightness: native_to_percent(
                        light.state.as_ref().and_then(|s| s.bri).unwrap_or(0),
                    ),
                    id,
                })
            })
            .collect();

        Ok(DeviceListing::live(devices))
    }

    async fn send_command(&self, command: &DeviceCommand) -> Result<CommandOutcome> {
        let token = self
            .token()
            .ok_or_else(|| HearthError::NotConfigured("no Hue token; authorize first".into()))?;

        let body: Value = match command.verb {
            CommandVerb::Power => {
                let on = command.value.as_bool().ok_or_else(|| {
                    HearthError::InvalidInput("power command requires a boolean value".into())
                })?;
                json!({ "on": on })
            }
            CommandVerb::Brightness => {
                let percent = command.value.as_int().ok_or_else(|| {
                    HearthError::InvalidInput("brightness command requires an integer value".into())
                })?;
                json!({ "bri": percent_to_native(percent) })
            }
            CommandVerb::Color => {
                let rgb = command.value.as_rgb().ok_or_else(|| {
                    HearthError::InvalidInput("color command requires an RGB value".into())
                })?;
                let (x, y) = rgb_to_xy(rgb)?;
                json!({ "xy": [x, y] })
            }
            other => {
                return Err(HearthError::InvalidInput(format!(
                    "unsupported Hue command: {other:?}"
                )))
            }
        };

        debug!(light = %command.target.device_id, verb = ?command.verb, "controlling Hue light");

        let url =
            format!("{}/route/api/0/lights/{}/state", self.api_base, command.target.device_id);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::PUT, &url)
                    .bearer_auth(&token)
                    .header("hue-application-key", &token)
                    .json(&body),
            )
            .await?;

        if response.status().is_success() {
            Ok(CommandOutcome::ok(format!("Successfully executed {:?} command", command.verb)))
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Ok(CommandOutcome::failed(vendor_status_error(status, &text).to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct RawLight {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    state: Option<RawLightState>,
}

#[derive(Debug, Deserialize)]
struct RawLightState {
    on: Option<bool>,
    bri: Option<i64>,
}

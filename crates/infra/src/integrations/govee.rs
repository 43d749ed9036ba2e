//! Govee cloud adapter (static API key auth)
//!
//! The vendor keys devices by the `(device, model)` pair rather than a
//! single id, so control calls must carry both; the model travels in
//! `CommandTarget::model`.

use async_trait::async_trait;
use hearth_core::DeviceIntegration;
use hearth_domain::constants::GOVEE_API_BASE;
use hearth_domain::{
    CommandOutcome, CommandValue, CommandVerb, Device, DeviceCommand, DeviceListing, GoveeDevice,
    HearthError, Result, Vendor,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::vendor_status_error;
use crate::http::HttpClient;

pub struct GoveeAdapter {
    http: HttpClient,
    api_key: Option<String>,
    api_base: String,
}

impl GoveeAdapter {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Ok(Self { http: HttpClient::new()?, api_key, api_base: GOVEE_API_BASE.to_string() })
    }

    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| HearthError::NotConfigured("GOVEE_API_KEY is not set".into()))
    }

    /// Current reported state for one device, raw vendor shape.
    pub async fn device_state(&self, device: &str, model: &str) -> Result<Value> {
        let api_key = self.api_key()?;
        let url = format!("{}/devices/state", self.api_base);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::GET, &url)
                    .query(&[("device", device), ("model", model)])
                    .header("Govee-API-Key", api_key),
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|err| HearthError::InvalidInput(format!("failed to parse Govee state: {err}")))
    }

    fn command_payload(command: &DeviceCommand) -> Result<(&'static str, Value)> {
        match command.verb {
            CommandVerb::Power => {
                let on = command.value.as_bool().ok_or_else(|| {
                    HearthError::InvalidInput("power command requires a boolean value".into())
                })?;
                Ok(("turn", json!(if on { "on" } else { "off" })))
            }
            CommandVerb::Brightness => {
                let level = command.value.as_int().ok_or_else(|| {
                    HearthError::InvalidInput("brightness command requires an integer value".into())
                })?;
                Ok(("brightness", json!(level)))
            }
            CommandVerb::Color => {
                let rgb = command.value.as_rgb().ok_or_else(|| {
                    HearthError::InvalidInput("color command requires an RGB value".into())
                })?;
                Ok(("color", json!({ "r": rgb.r, "g": rgb.g, "b": rgb.b })))
            }
            CommandVerb::ColorTemperature => {
                let kelvin = command.value.as_int().ok_or_else(|| {
                    HearthError::InvalidInput("colorTem command requires an integer value".into())
                })?;
                Ok(("colorTem", json!(kelvin)))
            }
            other => {
                Err(HearthError::InvalidInput(format!("unsupported Govee command: {other:?}")))
            }
        }
    }
}

#[async_trait]
impl DeviceIntegration for GoveeAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Govee
    }

    async fn list_devices(&self) -> Result<DeviceListing> {
        let api_key = match self.api_key() {
            Ok(key) => key,
            Err(_) => return Ok(DeviceListing::unconfigured()),
        };

        let url = format!("{}/devices", self.api_base);
        let response = self
            .http
            .send(self.http.request(Method::GET, &url).header("Govee-API-Key", api_key))
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        let envelope: DevicesEnvelope = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse Govee device list: {err}"))
        })?;

        let devices = envelope
            .data
            .map(|data| data.devices)
            .unwrap_or_default()
            .into_iter()
            .map(Device::Govee)
            .collect();

        Ok(DeviceListing::live(devices))
    }

    async fn send_command(&self, command: &DeviceCommand) -> Result<CommandOutcome> {
        let api_key = self.api_key()?;
        let model = command.target.model.as_deref().ok_or_else(|| {
            HearthError::InvalidInput("Govee control requires the device model".into())
        })?;

        let (name, value) = Self::command_payload(command)?;
        let body = json!({
            "device": command.target.device_id,
            "model": model,
            "cmd": { "name": name, "value": value }
        });

        debug!(device = %command.target.device_id, model, cmd = name, "controlling Govee device");

        let url = format!("{}/devices/control", self.api_base);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::PUT, &url)
                    .header("Govee-API-Key", api_key)
                    .json(&body),
            )
            .await?;

        if response.status().is_success() {
            Ok(CommandOutcome::ok(format!("Successfully executed {name} command")))
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Ok(CommandOutcome::failed(vendor_status_error(status, &text).to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct DevicesEnvelope {
    data: Option<DevicesData>,
}

#[derive(Debug, Deserialize)]
struct DevicesData {
    #[serde(default)]
    devices: Vec<GoveeDevice>,
}

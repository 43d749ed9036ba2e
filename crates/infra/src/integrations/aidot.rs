//! AI Dot smart light adapter (local network, no auth)
//!
//! Talks to a fixed list of configured hosts using the
//! community-reverse-engineered local HTTP API. Listing probes each host's
//! status endpoint with a short timeout; hosts that do not answer are
//! silently excluded — a partial result is a success, not a failure.

use std::time::Duration;

use async_trait::async_trait;
use hearth_core::DeviceIntegration;
use hearth_domain::constants::AIDOT_TIMEOUT_SECS;
use hearth_domain::{
    AiDotDevice, AiDotKind, AiDotState, CommandOutcome, CommandValue, CommandVerb, Device,
    DeviceCommand, DeviceListing, HearthError, Result, Rgb, Vendor,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::vendor_status_error;
use crate::http::HttpClient;

pub struct AiDotAdapter {
    http: HttpClient,
    hosts: Vec<String>,
}

impl AiDotAdapter {
    /// `hosts` are authority strings (`192.168.4.41` or `host:port`).
    pub fn new(hosts: Vec<String>) -> Result<Self> {
        let http =
            HttpClient::builder().timeout(Duration::from_secs(AIDOT_TIMEOUT_SECS)).build()?;
        Ok(Self { http, hosts })
    }

    /// Probe one device's status endpoint. `None` means unreachable.
    async fn device_state(&self, host: &str) -> Option<AiDotDevice> {
        let url = format!("http://{host}/api/status");
        let response = match self.http.send(self.http.request(Method::GET, &url)).await {
            Ok(response) => response,
            Err(err) => {
                debug!(host, error = %err, "AI Dot device not reachable");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(host, status = %response.status(), "AI Dot status probe rejected");
            return None;
        }

        let status: StatusResponse = match response.json().await {
            Ok(status) => status,
            Err(err) => {
                warn!(host, error = %err, "failed to parse AI Dot status");
                return None;
            }
        };

        Some(AiDotDevice {
            id: status.id.unwrap_or_else(|| host.replace('.', "_").replace(':', "_")),
            name: status.name.unwrap_or_else(|| format!("AI Dot Light ({host})")),
            ip: host.to_string(),
            model: status.model.unwrap_or_else(|| "Unknown".to_string()),
            kind: status.kind.unwrap_or(AiDotKind::Bulb),
            online: true,
            state: AiDotState {
                on: status.state.as_ref().map(|s| s.on.unwrap_or(false)).unwrap_or(false),
                brightness: status.state.as_ref().and_then(|s| s.brightness).unwrap_or(50),
                color: status.state.as_ref().and_then(|s| s.color),
                temperature: status.state.as_ref().and_then(|s| s.temperature),
            },
        })
    }

    async fn control(&self, host: &str, verb: CommandVerb, value: &CommandValue) -> Result<CommandOutcome> {
        let (endpoint, payload) = match verb {
            CommandVerb::Power => {
                let on = value.as_bool().ok_or_else(|| {
                    HearthError::InvalidInput("power command requires a boolean value".into())
                })?;
                ("/api/power", json!({ "on": on }))
            }
            CommandVerb::Brightness => {
                let brightness = value.as_int().ok_or_else(|| {
                    HearthError::InvalidInput("brightness command requires an integer value".into())
                })?;
                ("/api/brightness", json!({ "brightness": clamp_percent(brightness) }))
            }
            CommandVerb::Color => {
                let rgb = value.as_rgb().unwrap_or(Rgb { r: 255, g: 255, b: 255 });
                ("/api/color", json!({ "r": rgb.r, "g": rgb.g, "b": rgb.b }))
            }
            CommandVerb::ColorTemperature => {
                let temperature = value.as_int().ok_or_else(|| {
                    HearthError::InvalidInput("temperature command requires an integer value".into())
                })?;
                ("/api/temperature", json!({ "temperature": temperature }))
            }
            other => {
                return Err(HearthError::InvalidInput(format!(
                    "unsupported AI Dot command: {other:?}"
                )))
            }
        };

        let url = format!("http://{host}{endpoint}");
        debug!(host, endpoint, %payload, "controlling AI Dot device");

        let response =
            self.http.send(self.http.request(Method::POST, &url).json(&payload)).await?;

        if response.status().is_success() {
            Ok(CommandOutcome::ok(format!("Successfully controlled AI Dot device: {verb:?}")))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(CommandOutcome::failed(vendor_status_error(status, &body).to_string()))
        }
    }
}

/// Brightness values outside [0, 100] are clamped before send.
pub fn clamp_percent(value: i64) -> i64 {
    value.clamp(0, 100)
}

#[async_trait]
impl DeviceIntegration for AiDotAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::AiDot
    }

    async fn list_devices(&self) -> Result<DeviceListing> {
        if self.hosts.is_empty() {
            return Ok(DeviceListing::unconfigured());
        }

        let mut devices = Vec::new();
        for host in &self.hosts {
            if let Some(device) = self.device_state(host).await {
                devices.push(Device::AiDot(device));
            }
        }
        Ok(DeviceListing::live(devices))
    }

    async fn send_command(&self, command: &DeviceCommand) -> Result<CommandOutcome> {
        self.control(&command.target.device_id, command.verb, &command.value).await
    }
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    id: Option<String>,
    name: Option<String>,
    model: Option<String>,
    #[serde(rename = "type")]
    kind: Option<AiDotKind>,
    state: Option<StatusState>,
}

#[derive(Debug, Deserialize)]
struct StatusState {
    on: Option<bool>,
    brightness: Option<i64>,
    color: Option<Rgb>,
    temperature: Option<i64>,
}

#[cfg(test)]
mod tests {
    use hearth_domain::CommandTarget;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn host_of(server: &MockServer) -> String {
        server.uri().trim_start_matches("http://").to_string()
    }

    fn brightness_command(host: &str, value: i64) -> DeviceCommand {
        DeviceCommand {
            target: CommandTarget::new(Vendor::AiDot, host),
            verb: CommandVerb::Brightness,
            value: CommandValue::Int(value),
        }
    }

    #[test]
    fn brightness_is_clamped_to_percent_range() {
        assert_eq!(clamp_percent(-5), 0);
        assert_eq!(clamp_percent(150), 100);
        assert_eq!(clamp_percent(50), 50);
    }

    #[tokio::test]
    async fn clamped_brightness_goes_over_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/brightness"))
            .and(body_json(json!({ "brightness": 100 })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let host = host_of(&server);
        let adapter = AiDotAdapter::new(vec![host.clone()]).unwrap();
        let outcome = adapter.send_command(&brightness_command(&host, 150)).await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn unreachable_devices_are_excluded_from_listing() {
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

        // Second host points at a closed port.
        let hosts = vec![host_of(&server), "127.0.0.1:9".to_string()];
        let adapter = AiDotAdapter::new(hosts).unwrap();

        let listing = adapter.list_devices().await.unwrap();
        assert_eq!(listing.devices.len(), 1);
        match &listing.devices[0] {
            Device::AiDot(device) => {
                assert_eq!(device.name, "Desk Lamp");
                assert!(device.state.on);
                assert_eq!(device.state.brightness, 80);
            }
            other => panic!("expected AI Dot device, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_host_list_is_unconfigured() {
        let adapter = AiDotAdapter::new(vec![]).unwrap();
        let listing = adapter.list_devices().await.unwrap();
        assert!(listing.devices.is_empty());
        assert_eq!(listing.source, hearth_domain::ListingSource::Unconfigured);
    }

    #[tokio::test]
    async fn status_defaults_fill_missing_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let host = host_of(&server);
        let adapter = AiDotAdapter::new(vec![host.clone()]).unwrap();
        let listing = adapter.list_devices().await.unwrap();
        match &listing.devices[0] {
            Device::AiDot(device) => {
                assert_eq!(device.name, format!("AI Dot Light ({host})"));
                assert_eq!(device.model, "Unknown");
                assert_eq!(device.state.brightness, 50);
                assert!(!device.state.on);
            }
            other => panic!("expected AI Dot device, got {other:?}"),
        }
    }
}

//! Shark robot vacuum adapter (Ayla Networks cloud)
//!
//! Shark robots live behind the Ayla IoT platform: sign in with the Shark
//! account email/password, list devices, then read and write per-device
//! "properties" (operating_mode, battery_level, ...). Writes are datapoint
//! POSTs; the platform applies them asynchronously and nothing here waits
//! for the robot to confirm.
//!
//! Without a credential the adapter serves a mock robot so the dashboard
//! card still renders, and control calls succeed as no-ops.

use std::sync::Arc;

use async_trait::async_trait;
use hearth_core::{CredentialStore, DeviceIntegration};
use hearth_domain::constants::{AYLA_API_BASE, SHARK_MODE_DOCK, SHARK_MODE_START, SHARK_MODE_STOP};
use hearth_domain::{
    mock_shark_robot, CommandOutcome, CommandVerb, Credential, Device, DeviceCommand,
    DeviceListing, HearthError, Result, SharkCapabilities, SharkCleaningMode, SharkRobot,
    SharkStatus, Vendor,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::errors::vendor_status_error;
use crate::http::HttpClient;

pub struct SharkAdapter {
    http: HttpClient,
    credentials: Arc<CredentialStore>,
    username: Option<String>,
    password: Option<String>,
    api_base: String,
}

impl SharkAdapter {
    pub fn new(
        credentials: Arc<CredentialStore>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            credentials,
            username,
            password,
            api_base: AYLA_API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sign in with the configured account and stash the resulting token in
    /// the credential store.
    pub async fn sign_in(&self) -> Result<String> {
        let email = self
            .username
            .as_deref()
            .ok_or_else(|| HearthError::NotConfigured("SHARK_USERNAME is not set".into()))?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| HearthError::NotConfigured("SHARK_PASSWORD is not set".into()))?;

        let url = format!("{}/users/sign_in.json", self.api_base);
        let response = self
            .http
            .send(self.http.request(Method::POST, &url).json(&json!({
                "user": { "email": email, "password": password }
            })))
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HearthError::Auth(format!("Shark sign-in failed ({status}): {body}")));
        }

        let session: SignInResponse = response.json().await.map_err(|err| {
            HearthError::Auth(format!("failed to parse Shark sign-in response: {err}"))
        })?;

        info!("signed in to Shark account");
        self.credentials.set(Credential::new(Vendor::Shark, session.access_token.clone()));
        Ok(session.access_token)
    }

    fn token(&self) -> Option<String> {
        self.credentials.token(Vendor::Shark)
    }

    async fn fetch_properties(&self, token: &str, dsn: &str) -> Result<Vec<RawProperty>> {
        let url = format!("{}/dsns/{dsn}/properties.json", self.api_base);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::GET, &url)
                    .header("Authorization", format!("auth_token {token}")),
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        let wrapped: Vec<PropertyEnvelope> = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse Shark properties: {err}"))
        })?;
        Ok(wrapped.into_iter().map(|w| w.property).collect())
    }

    async fn post_datapoint(
        &self,
        token: &str,
        dsn: &str,
        property: &str,
        value: Value,
    ) -> Result<CommandOutcome> {
        let url = format!("{}/dsns/{dsn}/properties/{property}/datapoints.json", self.api_base);
        debug!(dsn, property, %value, "posting Shark datapoint");

        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, &url)
                    .header("Authorization", format!("auth_token {token}"))
                    .json(&json!({ "datapoint": { "value": value } })),
            )
            .await?;

        if response.status().is_success() {
            Ok(CommandOutcome::ok(format!("Set {property} on robot {dsn}")))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(CommandOutcome::failed(vendor_status_error(status, &body).to_string()))
        }
    }

    fn build_robot(device: RawDevice, properties: &[RawProperty]) -> SharkRobot {
        let int_prop = |name: &str| {
            properties
                .iter()
                .find(|p| p.name == name)
                .and_then(|p| p.value.as_ref())
                .and_then(Value::as_i64)
        };

        let operating_mode = int_prop("operating_mode").unwrap_or(SHARK_MODE_STOP);
        let docked = int_prop("dock_status").map(|v| v != 0).unwrap_or(false);
        let charging = int_prop("charging_status").map(|v| v != 0).unwrap_or(docked);
        let battery_level = int_prop("battery_level").unwrap_or(0);
        let cleaning_mode = match int_prop("power_mode") {
            Some(0) => SharkCleaningMode::Eco,
            Some(2) => SharkCleaningMode::Max,
            _ => SharkCleaningMode::Normal,
        };

        // Self-empty bases only ship on the IQ and Matrix lines.
        let self_empty = device.oem_model.contains("IQ") || device.oem_model.contains("Matrix");

        SharkRobot {
            id: device.dsn.clone(),
            name: device.product_name.unwrap_or_else(|| "Shark Robot".to_string()),
            model: device.oem_model,
            serial_number: device.dsn,
            online: device.connection_status.as_deref() == Some("Online"),
            status: SharkStatus {
                cleaning: operating_mode == SHARK_MODE_START,
                docked,
                charging,
                battery_level,
                cleaning_mode,
                error: None,
            },
            capabilities: SharkCapabilities {
                room_cleaning: true,
                self_empty,
                mapping: true,
            },
        }
    }
}

fn cleaning_mode_value(command: &DeviceCommand) -> Result<i64> {
    match command.value.as_text() {
        Some("eco") => Ok(0),
        Some("normal") => Ok(1),
        Some("max") => Ok(2),
        Some(other) => {
            Err(HearthError::InvalidInput(format!("unknown Shark power mode: {other}")))
        }
        None => command.value.as_int().ok_or_else(|| {
            HearthError::InvalidInput("power mode command requires eco/normal/max".into())
        }),
    }
}

#[async_trait]
impl DeviceIntegration for SharkAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Shark
    }

    async fn list_devices(&self) -> Result<DeviceListing> {
        let Some(token) = self.token() else {
            return Ok(DeviceListing::mock(vec![Device::Shark(mock_shark_robot())]));
        };

        let url = format!("{}/devices.json", self.api_base);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::GET, &url)
                    .header("Authorization", format!("auth_token {token}")),
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        let wrapped: Vec<DeviceEnvelope> = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse Shark device list: {err}"))
        })?;

        // The Ayla account can hold non-vacuum Ninja appliances too.
        let mut devices = Vec::new();
        for envelope in wrapped {
            let device = envelope.device;
            if !device.oem_model.to_lowercase().contains("shark") {
                continue;
            }
            let properties = self.fetch_properties(&token, &device.dsn).await?;
            devices.push(Device::Shark(Self::build_robot(device, &properties)));
        }

        Ok(DeviceListing::live(devices))
    }

    async fn send_command(&self, command: &DeviceCommand) -> Result<CommandOutcome> {
        let Some(token) = self.token() else {
            // Mock mode mirrors the mock listing: accept the command and
            // pretend it worked.
            return Ok(CommandOutcome::ok(format!(
                "Mock: {:?} accepted for robot {}",
                command.verb, command.target.device_id
            )));
        };

        let dsn = &command.target.device_id;
        match command.verb {
            CommandVerb::Start => {
                self.post_datapoint(&token, dsn, "operating_mode", json!(SHARK_MODE_START)).await
            }
            CommandVerb::Stop => {
                self.post_datapoint(&token, dsn, "operating_mode", json!(SHARK_MODE_STOP)).await
            }
            CommandVerb::Dock => {
                self.post_datapoint(&token, dsn, "operating_mode", json!(SHARK_MODE_DOCK)).await
            }
            CommandVerb::FindMe => self.post_datapoint(&token, dsn, "find_device", json!(1)).await,
            CommandVerb::PowerMode => {
                let value = cleaning_mode_value(command)?;
                self.post_datapoint(&token, dsn, "power_mode", json!(value)).await
            }
            CommandVerb::CleanRoom => {
                let room = command.target.room.as_deref().ok_or_else(|| {
                    HearthError::InvalidInput("room cleaning requires a room id".into())
                })?;
                let outcome =
                    self.post_datapoint(&token, dsn, "room_list", json!(room)).await?;
                if !outcome.success {
                    return Ok(outcome);
                }
                self.post_datapoint(&token, dsn, "operating_mode", json!(SHARK_MODE_START)).await
            }
            other => {
                Err(HearthError::InvalidInput(format!("unsupported Shark command: {other:?}")))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DeviceEnvelope {
    device: RawDevice,
}

#[derive(Debug, Deserialize)]
struct RawDevice {
    dsn: String,
    oem_model: String,
    product_name: Option<String>,
    connection_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PropertyEnvelope {
    property: RawProperty,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use hearth_domain::{CommandTarget, CommandValue, ListingSource};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn adapter_for(server: &MockServer, with_token: bool) -> SharkAdapter {
        let credentials = Arc::new(CredentialStore::new());
        if with_token {
            credentials.set(Credential::new(Vendor::Shark, "ayla-token"));
        }
        SharkAdapter::new(credentials, Some("user@example.com".into()), Some("hunter2".into()))
            .unwrap()
            .with_api_base(server.uri())
    }

    #[tokio::test]
    async fn missing_token_serves_exactly_one_mock_robot() {
        let server = MockServer::start().await;
        let listing = adapter_for(&server, false).list_devices().await.unwrap();

        assert_eq!(listing.source, ListingSource::Mock);
        assert_eq!(listing.devices.len(), 1);
        match &listing.devices[0] {
            Device::Shark(robot) => {
                assert!(robot.online);
                assert_eq!(robot.status.battery_level, 85);
                assert!(robot.status.docked);
            }
            other => panic!("expected Shark robot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sign_in_posts_nested_user_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/sign_in.json"))
            .and(body_json(json!({
                "user": { "email": "user@example.com", "password": "hunter2" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-ayla-token",
                "refresh_token": "r"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server, false);
        let token = adapter.sign_in().await.unwrap();
        assert_eq!(token, "fresh-ayla-token");
        assert_eq!(adapter.credentials.token(Vendor::Shark).as_deref(), Some("fresh-ayla-token"));
    }

    #[tokio::test]
    async fn listing_filters_to_shark_models_and_reads_properties() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices.json"))
            .and(header("Authorization", "auth_token ayla-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "device": { "dsn": "AC000W001", "oem_model": "SharkIQRobot",
                              "product_name": "Living Room Shark",
                              "connection_status": "Online" } },
                { "device": { "dsn": "NJ000B001", "oem_model": "NinjaBlender",
                              "product_name": "Blender",
                              "connection_status": "Online" } }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dsns/AC000W001/properties.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "property": { "name": "operating_mode", "value": 1 } },
                { "property": { "name": "battery_level", "value": 62 } },
                { "property": { "name": "dock_status", "value": 0 } },
                { "property": { "name": "power_mode", "value": 2 } }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let listing = adapter_for(&server, true).list_devices().await.unwrap();
        assert_eq!(listing.source, ListingSource::Live);
        assert_eq!(listing.devices.len(), 1);
        match &listing.devices[0] {
            Device::Shark(robot) => {
                assert_eq!(robot.name, "Living Room Shark");
                assert!(robot.status.cleaning);
                assert!(!robot.status.docked);
                assert_eq!(robot.status.battery_level, 62);
                assert_eq!(robot.status.cleaning_mode, SharkCleaningMode::Max);
                assert!(robot.capabilities.self_empty);
            }
            other => panic!("expected Shark robot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dock_command_posts_operating_mode_3() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dsns/AC000W001/properties/operating_mode/datapoints.json"))
            .and(header("Authorization", "auth_token ayla-token"))
            .and(body_json(json!({ "datapoint": { "value": 3 } })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let command = DeviceCommand {
            target: CommandTarget::new(Vendor::Shark, "AC000W001"),
            verb: CommandVerb::Dock,
            value: CommandValue::None,
        };
        let outcome = adapter_for(&server, true).send_command(&command).await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn power_mode_maps_names_to_datapoint_values() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dsns/AC000W001/properties/power_mode/datapoints.json"))
            .and(body_json(json!({ "datapoint": { "value": 0 } })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let command = DeviceCommand {
            target: CommandTarget::new(Vendor::Shark, "AC000W001"),
            verb: CommandVerb::PowerMode,
            value: CommandValue::Text("eco".into()),
        };
        let outcome = adapter_for(&server, true).send_command(&command).await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn room_clean_posts_room_list_then_starts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dsns/AC000W001/properties/room_list/datapoints.json"))
            .and(body_json(json!({ "datapoint": { "value": "kitchen" } })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/dsns/AC000W001/properties/operating_mode/datapoints.json"))
            .and(body_json(json!({ "datapoint": { "value": 1 } })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let command = DeviceCommand {
            target: CommandTarget::new(Vendor::Shark, "AC000W001").with_room("kitchen"),
            verb: CommandVerb::CleanRoom,
            value: CommandValue::None,
        };
        let outcome = adapter_for(&server, true).send_command(&command).await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn no_token_control_is_a_mock_no_op() {
        let server = MockServer::start().await;
        let command = DeviceCommand {
            target: CommandTarget::new(Vendor::Shark, "SHARK123456"),
            verb: CommandVerb::Start,
            value: CommandValue::None,
        };
        let outcome = adapter_for(&server, false).send_command(&command).await.unwrap();
        assert!(outcome.success);
        assert!(outcome.message.starts_with("Mock:"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

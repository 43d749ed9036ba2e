//! Device model
//!
//! Each vendor keeps its own payload shape (the fields its wire protocol
//! actually returns); the orchestrator and the UI only ever see the common
//! [`DeviceSummary`] projection. Device ids are vendor-assigned and opaque,
//! unique only within a vendor's namespace, so anything that mixes vendors
//! must key by `(vendor, id)`.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Govee,
    AiDot,
    Hue,
    Shark,
    Spotify,
}

impl Vendor {
    pub const ALL: [Vendor; 5] =
        [Vendor::Govee, Vendor::AiDot, Vendor::Hue, Vendor::Shark, Vendor::Spotify];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Govee => "govee",
            Vendor::AiDot => "aidot",
            Vendor::Hue => "hue",
            Vendor::Shark => "shark",
            Vendor::Spotify => "spotify",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls the UI may legally offer for a device. Sending an unsupported
/// command is a vendor-side no-op or error, never validated locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Power,
    Brightness,
    Color,
    ColorTemperature,
    Dock,
    FindMe,
    RoomClean,
    PowerMode,
    Playback,
    Volume,
}

/// A device as reported by one of the vendor adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "vendor", rename_all = "lowercase")]
pub enum Device {
    Govee(GoveeDevice),
    AiDot(AiDotDevice),
    Hue(HueLight),
    Shark(SharkRobot),
    Spotify(SpotifyDevice),
}

impl Device {
    pub fn vendor(&self) -> Vendor {
        match self {
            Device::Govee(_) => Vendor::Govee,
            Device::AiDot(_) => Vendor::AiDot,
            Device::Hue(_) => Vendor::Hue,
            Device::Shark(_) => Vendor::Shark,
            Device::Spotify(_) => Vendor::Spotify,
        }
    }

    /// Common projection for orchestrator-level rendering.
    pub fn summary(&self) -> DeviceSummary {
        match self {
            Device::Govee(d) => DeviceSummary {
                id: d.device.clone(),
                vendor: Vendor::Govee,
                display_name: d.device_name.clone(),
                online: d.controllable,
                capabilities: d.capabilities(),
            },
            Device::AiDot(d) => DeviceSummary {
                id: d.id.clone(),
                vendor: Vendor::AiDot,
                display_name: d.name.clone(),
                online: d.online,
                capabilities: BTreeSet::from([
                    Capability::Power,
                    Capability::Brightness,
                    Capability::Color,
                    Capability::ColorTemperature,
                ]),
            },
            Device::Hue(d) => DeviceSummary {
                id: d.id.clone(),
                vendor: Vendor::Hue,
                display_name: d.name.clone(),
                online: true,
                capabilities: BTreeSet::from([
                    Capability::Power,
                    Capability::Brightness,
                    Capability::Color,
                ]),
            },
            Device::Shark(d) => DeviceSummary {
                id: d.id.clone(),
                vendor: Vendor::Shark,
                display_name: d.name.clone(),
                online: d.online,
                capabilities: {
                    let mut caps =
                        BTreeSet::from([Capability::Dock, Capability::FindMe, Capability::PowerMode]);
                    if d.capabilities.room_cleaning {
                        caps.insert(Capability::RoomClean);
                    }
                    caps
                },
            },
            Device::Spotify(d) => DeviceSummary {
                id: d.id.clone(),
                vendor: Vendor::Spotify,
                display_name: d.name.clone(),
                online: d.is_active,
                capabilities: {
                    let mut caps = BTreeSet::from([Capability::Playback]);
                    if d.supports_volume {
                        caps.insert(Capability::Volume);
                    }
                    caps
                },
            },
        }
    }
}

/// Vendor-agnostic device projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub id: String,
    pub vendor: Vendor,
    pub display_name: String,
    pub online: bool,
    pub capabilities: BTreeSet<Capability>,
}

/// Where a device listing came from, so callers can distinguish "no
/// devices" from "mock fallback" from "not set up yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingSource {
    Live,
    Mock,
    Unconfigured,
}

/// Result of a vendor list call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceListing {
    pub devices: Vec<Device>,
    pub source: ListingSource,
}

impl DeviceListing {
    pub fn live(devices: Vec<Device>) -> Self {
        Self { devices, source: ListingSource::Live }
    }

    pub fn mock(devices: Vec<Device>) -> Self {
        Self { devices, source: ListingSource::Mock }
    }

    pub fn unconfigured() -> Self {
        Self { devices: Vec::new(), source: ListingSource::Unconfigured }
    }
}

/// Govee device as returned by the cloud API. The vendor keys devices by
/// the `(device, model)` pair, not a single id; control calls must send both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoveeDevice {
    pub device: String,
    pub model: String,
    #[serde(rename = "deviceName")]
    pub device_name: String,
    pub controllable: bool,
    pub retrievable: bool,
    #[serde(rename = "supportCmds", default)]
    pub support_cmds: Vec<String>,
}

impl GoveeDevice {
    fn capabilities(&self) -> BTreeSet<Capability> {
        self.support_cmds
            .iter()
            .filter_map(|cmd| match cmd.as_str() {
                "turn" => Some(Capability::Power),
                "brightness" => Some(Capability::Brightness),
                "color" => Some(Capability::Color),
                "colorTem" => Some(Capability::ColorTemperature),
                _ => None,
            })
            .collect()
    }
}

/// AI Dot light on the local network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiDotDevice {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: AiDotKind,
    pub online: bool,
    pub state: AiDotState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiDotKind {
    Bulb,
    Strip,
    Panel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiDotState {
    pub on: bool,
    /// 0-100
    pub brightness: i64,
    pub color: Option<Rgb>,
    /// Color temperature in Kelvin
    pub temperature: Option<i64>,
}

/// RGB color triple, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue light as seen through the bridge-proxy, brightness already
/// normalized to 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HueLight {
    pub id: String,
    pub name: String,
    pub archetype: String,
    pub on: bool,
    pub brightness: i64,
}

/// Shark robot vacuum
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharkRobot {
    pub id: String,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub online: bool,
    pub status: SharkStatus,
    pub capabilities: SharkCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharkStatus {
    pub cleaning: bool,
    pub docked: bool,
    pub charging: bool,
    /// 0-100
    pub battery_level: i64,
    pub cleaning_mode: SharkCleaningMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharkCleaningMode {
    Eco,
    Normal,
    Max,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharkCapabilities {
    pub room_cleaning: bool,
    pub self_empty: bool,
    pub mapping: bool,
}

/// Spotify Connect playback device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyDevice {
    pub id: String,
    pub is_active: bool,
    pub is_private_session: bool,
    pub is_restricted: bool,
    pub name: String,
    /// Computer, Smartphone, Speaker, etc.
    #[serde(rename = "type")]
    pub kind: String,
    pub volume_percent: i64,
    pub supports_volume: bool,
}

/// Fixture returned when no Shark credential is configured, so the UI has
/// something to render.
pub fn mock_shark_robot() -> SharkRobot {
    SharkRobot {
        id: "SHARK123456".to_string(),
        name: "Kitchen Shark Robot".to_string(),
        model: "Shark AI Ultra".to_string(),
        serial_number: "SHARK123456".to_string(),
        online: true,
        status: SharkStatus {
            cleaning: false,
            docked: true,
            charging: true,
            battery_level: 85,
            cleaning_mode: SharkCleaningMode::Normal,
            error: None,
        },
        capabilities: SharkCapabilities { room_cleaning: true, self_empty: true, mapping: true },
    }
}

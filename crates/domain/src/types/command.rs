//! Device command model
//!
//! A command is addressed to a vendor-qualified device and carries a verb
//! plus a verb-dependent value. Values are not validated before
//! transmission except where an adapter clamps (AI Dot brightness); an
//! unsupported verb is the vendor's problem, not ours.

use serde::{Deserialize, Serialize};

use super::device::{Rgb, Vendor};

/// What to do to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandVerb {
    Power,
    Brightness,
    Color,
    ColorTemperature,
    Start,
    Stop,
    Dock,
    FindMe,
    PowerMode,
    CleanRoom,
    Play,
    Pause,
    Next,
    Previous,
    Volume,
    Transfer,
}

/// Verb-dependent command value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandValue {
    Bool(bool),
    Int(i64),
    Rgb(Rgb),
    Text(String),
    None,
}

impl CommandValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CommandValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CommandValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<Rgb> {
        match self {
            CommandValue::Rgb(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CommandValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl Default for CommandValue {
    fn default() -> Self {
        CommandValue::None
    }
}

/// Vendor-qualified command target. `model` is required by Govee (the
/// vendor de-dupes on the `(device, model)` pair); `room` carries the room
/// id for Shark room cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTarget {
    pub vendor: Vendor,
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl CommandTarget {
    pub fn new(vendor: Vendor, device_id: impl Into<String>) -> Self {
        Self { vendor, device_id: device_id.into(), model: None, room: None }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }
}

/// A control command headed for a vendor adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCommand {
    pub target: CommandTarget,
    pub verb: CommandVerb,
    #[serde(default)]
    pub value: CommandValue,
}

/// Result of a control call. Success means the vendor returned 2xx; no
/// adapter verifies the device actually applied the state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

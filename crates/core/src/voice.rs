//! Voice command relay
//!
//! Takes free-text transcribed speech (or a device/action pair) and formats
//! it as a natural-language instruction for the user to speak to their
//! assistant device. This is a stateless formatter: no device API is ever
//! called from here, and no device state changes.

use serde::{Deserialize, Serialize};

/// Actions the formatter knows how to phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceAction {
    TurnOn,
    TurnOff,
    Brightness,
    Color,
    SceneBright,
    SceneDim,
    SceneOff,
    SceneCozy,
}

/// Formatted relay instruction handed back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayedCommand {
    pub success: bool,
    pub message: String,
    pub command: String,
    pub instructions: String,
}

/// Phrase a smart-home action as an assistant voice command.
pub fn create_voice_command(device: &str, action: VoiceAction, value: Option<&str>) -> String {
    match action {
        VoiceAction::TurnOn => format!("turn on the {device}"),
        VoiceAction::TurnOff => format!("turn off the {device}"),
        VoiceAction::Brightness => {
            format!("set the {device} to {}%", value.unwrap_or("50"))
        }
        VoiceAction::Color => {
            format!("change the {device} to {}", value.unwrap_or("white"))
        }
        VoiceAction::SceneBright => "turn on all lights".to_string(),
        VoiceAction::SceneDim => "dim all lights to 20%".to_string(),
        VoiceAction::SceneOff => "turn off all lights".to_string(),
        VoiceAction::SceneCozy => "set mood lighting".to_string(),
    }
}

/// Wrap a transcribed command into the relay instruction the UI shows.
pub fn relay_command(command: &str) -> RelayedCommand {
    RelayedCommand {
        success: true,
        message: format!("Voice command ready: \"{command}\""),
        command: command.to_string(),
        instructions: format!("Say to your Google Home/Assistant: \"{command}\""),
    }
}

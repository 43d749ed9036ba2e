//! Voice assistant relay route
//!
//! Formats commands for the user to speak aloud. Nothing here touches a
//! device API.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hearth_core::{create_voice_command, relay_command, VoiceAction};
use hearth_domain::HearthError;
use serde_json::Value;
use tracing::info;

use super::ApiError;
use crate::context::AppContext;

/// `POST /api/assistant/command`
///
/// Accepts either a pre-phrased `{command}` or a `{device, action, value?}`
/// triple to phrase first.
pub async fn command(
    State(_context): State<AppContext>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let phrased = if let Some(command) = body.get("command").and_then(Value::as_str) {
        command.to_string()
    } else {
        let device = body
            .get("device")
            .and_then(Value::as_str)
            .ok_or_else(|| HearthError::InvalidInput("command or device is required".into()))?;
        let action: VoiceAction = body
            .get("action")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|_| HearthError::InvalidInput("unknown voice action".into()))?
            .ok_or_else(|| HearthError::InvalidInput("action is required".into()))?;
        let value = body.get("value").and_then(Value::as_str);
        create_voice_command(device, action, value)
    };

    info!(command = %phrased, "voice command relayed");
    Ok(Json(relay_command(&phrased)).into_response())
}

//! Device listing and control routes
//!
//! One parameterized pair of routes covers every vendor category; the
//! orchestrator owns the fan-out and the per-category state machine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hearth_core::CategoryState;
use hearth_domain::{
    CommandTarget, CommandValue, CommandVerb, DeviceCommand, HearthError, Vendor,
};
use serde_json::{json, Value};
use tracing::info;

use super::ApiError;
use crate::context::AppContext;

fn parse_vendor(raw: &str) -> Option<Vendor> {
    Vendor::ALL.into_iter().find(|v| v.as_str() == raw)
}

fn state_response(state: CategoryState) -> Response {
    match state {
        CategoryState::Ready(listing) => Json(json!({
            "devices": listing.devices,
            "source": listing.source,
        }))
        .into_response(),
        CategoryState::Unavailable { message } => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response(),
        // refresh() only ever resolves to ready or unavailable.
        CategoryState::Idle | CategoryState::Loading => {
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /api/{vendor}/devices`
pub async fn list(
    State(context): State<AppContext>,
    Path(vendor): Path<String>,
) -> Result<Response, ApiError> {
    let vendor = parse_vendor(&vendor)
        .ok_or_else(|| HearthError::NotFound(format!("unknown vendor: {vendor}")))?;
    let state = context.orchestrator.refresh(vendor).await?;
    Ok(state_response(state))
}

/// `GET /api/dashboard/devices` — every category in one response.
pub async fn dashboard(State(context): State<AppContext>) -> Response {
    let states = context.orchestrator.refresh_all().await;
    let categories: serde_json::Map<String, Value> = states
        .into_iter()
        .map(|(vendor, state)| (vendor.to_string(), json!(state)))
        .collect();
    Json(json!({ "categories": categories })).into_response()
}

/// `POST /api/{vendor}/control`
pub async fn control(
    State(context): State<AppContext>,
    Path(vendor): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let vendor = parse_vendor(&vendor)
        .ok_or_else(|| HearthError::NotFound(format!("unknown vendor: {vendor}")))?;
    let command = parse_control(vendor, &body)?;

    info!(%vendor, device_id = %command.target.device_id, verb = ?command.verb, "control request");

    let outcome = context.orchestrator.send_command(&command).await?;
    Ok(Json(json!({ "success": outcome.success, "message": outcome.message })).into_response())
}

/// Build a `DeviceCommand` from a request body, rejecting missing fields
/// with a message rather than a bare deserialization failure.
fn parse_control(vendor: Vendor, body: &Value) -> Result<DeviceCommand, HearthError> {
    // Spotify commands may target "whatever device is active".
    let device_id = match body.get("deviceId").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None if vendor == Vendor::Spotify => String::new(),
        None => return Err(HearthError::InvalidInput("deviceId is required".into())),
    };

    let action = body
        .get("action")
        .cloned()
        .ok_or_else(|| HearthError::InvalidInput("action is required".into()))?;
    let verb: CommandVerb = serde_json::from_value(action)
        .map_err(|_| HearthError::InvalidInput("unknown action".into()))?;

    let value = match body.get("value") {
        Some(raw) => serde_json::from_value::<CommandValue>(raw.clone())
            .map_err(|_| HearthError::InvalidInput("unsupported value shape".into()))?,
        None => CommandValue::None,
    };

    let mut target = CommandTarget::new(vendor, device_id);
    if let Some(model) = body.get("model").and_then(Value::as_str) {
        target = target.with_model(model);
    }
    if let Some(room) = body.get("roomId").and_then(Value::as_str) {
        target = target.with_room(room);
    }

    Ok(DeviceCommand { target, verb, value })
}

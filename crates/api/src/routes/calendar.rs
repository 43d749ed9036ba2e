//! Calendar routes

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hearth_core::{validate_external_ids, CalendarPort};
use hearth_domain::{HearthError, NewCalendarEvent};
use serde_json::{json, Value};
use tracing::info;

use super::ApiError;
use crate::context::AppContext;

/// `GET /api/calendar/sync` — merged per-date view of local records and
/// synced external events. Without a Google token the view is local-only.
pub async fn sync(State(context): State<AppContext>) -> Result<Response, ApiError> {
    let token = context.google_token();
    let merged = context.calendar.fetch_all_events(token.as_deref()).await?;

    for events in merged.values() {
        validate_external_ids(events)?;
    }

    Ok(Json(json!({
        "synced": token.is_some(),
        "events": merged,
    }))
    .into_response())
}

/// `POST /api/calendar/events` — insert one event into the external
/// calendar.
pub async fn create_event(
    State(context): State<AppContext>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let token = context
        .google_token()
        .ok_or_else(|| HearthError::NotConfigured("no Google Calendar token".into()))?;

    let event = parse_new_event(&body)?;
    let id = context.google_calendar.create_event(&token, &event).await?;

    info!(event_id = %id, "calendar event created");
    Ok(Json(json!({ "success": true, "id": id })).into_response())
}

fn parse_new_event(body: &Value) -> Result<NewCalendarEvent, HearthError> {
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| HearthError::InvalidInput(format!("{name} is required")))
    };

    Ok(NewCalendarEvent {
        title: field("title")?,
        description: body.get("description").and_then(Value::as_str).map(str::to_string),
        start: field("start")?,
        end: field("end")?,
        location: body.get("location").and_then(Value::as_str).map(str::to_string),
    })
}

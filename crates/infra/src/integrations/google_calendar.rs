//! Google Calendar client
//!
//! Syncs the primary calendar's upcoming events into the dashboard's
//! common event shape. The access token arrives per call from the route
//! layer rather than the credential store because the calendar pages
//! predate the vendor store and keep their own token plumbing.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use hearth_core::CalendarPort;
use hearth_domain::constants::{
    CALENDAR_EVENT_TIMEZONE, CALENDAR_MAX_RESULTS, GOOGLE_CALENDAR_API_BASE,
};
use hearth_domain::{
    CalendarEvent, EventKind, EventSource, HearthError, NewCalendarEvent, Result,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::vendor_status_error;
use crate::http::HttpClient;

pub struct GoogleCalendarClient {
    http: HttpClient,
    api_base: String,
}

impl GoogleCalendarClient {
    pub fn new() -> Result<Self> {
        Ok(Self { http: HttpClient::new()?, api_base: GOOGLE_CALENDAR_API_BASE.to_string() })
    }

    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/primary/events", self.api_base)
    }
}

/// Date an event falls on. Timed events carry an RFC 3339 `dateTime`;
/// all-day events only carry a plain `date`.
fn event_date(when: &EventTime) -> Option<NaiveDate> {
    if let Some(date_time) = &when.date_time {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(date_time) {
            return Some(parsed.date_naive());
        }
    }
    when.date.as_deref().and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

#[async_trait]
impl CalendarPort for GoogleCalendarClient {
    async fn list_events(&self, access_token: &str) -> Result<Vec<CalendarEvent>> {
        let now = Utc::now().to_rfc3339();
        let max_results = CALENDAR_MAX_RESULTS.to_string();
        let response = self
            .http
            .send(
                self.http
                    .request(Method::GET, &self.events_url())
                    .query(&[
                        ("timeMin", now.as_str()),
                        ("maxResults", max_results.as_str()),
                        ("singleEvents", "true"),
                        ("orderBy", "startTime"),
                    ])
                    .bearer_auth(access_token),
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        let page: EventsPage = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse calendar events: {err}"))
        })?;

        let events = page
            .items
            .into_iter()
            .filter_map(|item| {
                let date = item.start.as_ref().and_then(event_date)?;
                Some(CalendarEvent {
                    id: CalendarEvent::external_id(&item.id),
                    title: item.summary.unwrap_or_else(|| "(no title)".to_string()),
                    date,
                    kind: EventKind::External,
                    source: EventSource::Google,
                    person: None,
                    priority: None,
                })
            })
            .collect::<Vec<_>>();

        debug!(count = events.len(), "synced Google Calendar events");
        Ok(events)
    }

    async fn create_event(&self, access_token: &str, event: &NewCalendarEvent) -> Result<String> {
        let body = json!({
            "summary": event.title,
            "description": event.description,
            "location": event.location,
            "start": { "dateTime": event.start, "timeZone": CALENDAR_EVENT_TIMEZONE },
            "end": { "dateTime": event.end, "timeZone": CALENDAR_EVENT_TIMEZONE },
        });

        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, &self.events_url())
                    .bearer_auth(access_token)
                    .json(&body),
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(vendor_status_error(status, &body));
        }

        let created: CreatedEvent = response.json().await.map_err(|err| {
            HearthError::InvalidInput(format!("failed to parse created event: {err}"))
        })?;
        Ok(created.id)
    }
}

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    summary: Option<String>,
    start: Option<EventTime>,
}

#[derive(Debug, Deserialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedEvent {
    id: String,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> GoogleCalendarClient {
        GoogleCalendarClient::new().unwrap().with_api_base(server.uri())
    }

    #[tokio::test]
    async fn listing_maps_timed_and_all_day_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("orderBy", "startTime"))
            .and(query_param("maxResults", "50"))
            .and(header("Authorization", "Bearer google-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "ev1", "summary": "Dentist",
                      "start": { "dateTime": "2026-09-01T10:00:00-04:00" } },
                    { "id": "ev2", "summary": "School Holiday",
                      "start": { "date": "2026-09-07" } },
                    { "id": "ev3", "summary": "No start at all" }
                ]
            })))
            .mount(&server)
            .await;

        let events = client_for(&server).list_events("google-token").await.unwrap();
        // Events without any start date are dropped.
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "google:ev1");
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(events[0].kind, EventKind::External);
        assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2026, 9, 7).unwrap());
    }

    #[tokio::test]
    async fn untitled_events_get_a_placeholder_title() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "id": "ev1", "start": { "date": "2026-09-07" } }]
            })))
            .mount(&server)
            .await;

        let events = client_for(&server).list_events("t").await.unwrap();
        assert_eq!(events[0].title, "(no title)");
    }

    #[tokio::test]
    async fn create_posts_the_event_with_timezone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calendars/primary/events"))
            .and(header("Authorization", "Bearer google-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "new-ev" })))
            .expect(1)
            .mount(&server)
            .await;

        let event = NewCalendarEvent {
            title: "Family Dinner".into(),
            description: Some("Lasagna night".into()),
            start: "2026-09-02T18:00:00".into(),
            end: "2026-09-02T19:30:00".into(),
            location: None,
        };

        let id = client_for(&server).create_event("google-token", &event).await.unwrap();
        assert_eq!(id, "new-ev");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["summary"], "Family Dinner");
        assert_eq!(body["start"]["timeZone"], "America/New_York");
        assert_eq!(body["end"]["dateTime"], "2026-09-02T19:30:00");
    }

    #[tokio::test]
    async fn expired_token_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Credentials"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_events("stale").await.unwrap_err();
        assert!(matches!(err, HearthError::Auth(_)));
    }
}

//! Calendar event model
//!
//! Events come from two origins: local meal/task/reminder records and
//! synced external calendar events. External ids are prefixed before they
//! meet local ids so the merge can never collide.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix applied to external event ids before merging.
pub const EXTERNAL_EVENT_ID_PREFIX: &str = "google:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Meal,
    Task,
    Reminder,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Local,
    Google,
}

/// A single dashboard calendar entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub source: EventSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl CalendarEvent {
    /// Namespace an external id so it cannot collide with a local record id.
    pub fn external_id(raw: &str) -> String {
        format!("{EXTERNAL_EVENT_ID_PREFIX}{raw}")
    }

    pub fn is_external(&self) -> bool {
        self.source == EventSource::Google
    }
}

/// Request body for creating an external calendar event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCalendarEvent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 start datetime
    pub start: String,
    /// RFC 3339 end datetime
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_ids_are_prefixed() {
        assert_eq!(CalendarEvent::external_id("abc123"), "google:abc123");
    }
}

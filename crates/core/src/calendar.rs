//! Calendar merge service
//!
//! Merges local meal/task records with externally-synced calendar events
//! into a per-date view. The merge never replaces: two events that land on
//! the same date are both kept, and external ids arrive already namespaced
//! (`google:` prefix) so a local and an external event cannot collide.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use hearth_domain::{CalendarEvent, HearthError, Result};
use tracing::debug;

use crate::ports::{CalendarPort, LocalEventsPort};

/// Aggregates local records with the external provider.
pub struct CalendarService {
    local: Arc<dyn LocalEventsPort>,
    external: Arc<dyn CalendarPort>,
}

impl CalendarService {
    pub fn new(local: Arc<dyn LocalEventsPort>, external: Arc<dyn CalendarPort>) -> Self {
        Self { local, external }
    }

    /// All events keyed by date. When no external token is available the
    /// view still contains the local records; only a hard failure of the
    /// local source is an error.
    pub async fn fetch_all_events(
        &self,
        external_token: Option<&str>,
    ) -> Result<BTreeMap<NaiveDate, Vec<CalendarEvent>>> {
        let local_events = self.local.list_events().await?;

        let external_events = match external_token {
            Some(token) => self.external.list_events(token).await?,
            None => Vec::new(),
        };

        debug!(
            local = local_events.len(),
            external = external_events.len(),
            "merging calendar events"
        );

        Ok(merge_events(local_events, external_events))
    }
}

/// Merge-not-replace: every event keeps its slot under its date.
pub fn merge_events(
    local: Vec<CalendarEvent>,
    external: Vec<CalendarEvent>,
) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    let mut merged: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for event in local.into_iter().chain(external) {
        merged.entry(event.date).or_default().push(event);
    }
    merged
}

/// Sanity check used by the sync route: an external event whose id lacks
/// the namespace prefix indicates a mapping bug upstream.
pub fn validate_external_ids(events: &[CalendarEvent]) -> Result<()> {
    for event in events {
        if event.is_external() && !event.id.starts_with(hearth_domain::EXTERNAL_EVENT_ID_PREFIX) {
            return Err(HearthError::Internal(format!(
                "external event id missing namespace prefix: {}",
                event.id
            )));
        }
    }
    Ok(())
}

//! Application context
//!
//! Builds every adapter once from config, seeds the credential store with
//! any tokens supplied up front, and hands the routes a single shared
//! state value. Adapter construction never fails on missing credentials;
//! a vendor without credentials degrades to its mock or unconfigured
//! listing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use hearth_core::{
    CalendarService, CredentialStore, DashboardOrchestrator, DeviceIntegration, LocalEventsPort,
};
use hearth_domain::{CalendarEvent, Config, Credential, EventKind, EventSource, Result, Vendor};
use hearth_infra::integrations::aidot::AiDotAdapter;
use hearth_infra::integrations::google_calendar::GoogleCalendarClient;
use hearth_infra::integrations::govee::GoveeAdapter;
use hearth_infra::integrations::hue::HueAdapter;
use hearth_infra::integrations::shark::SharkAdapter;
use hearth_infra::integrations::spotify::{SpotifyAdapter, SpotifyAuth};
use tracing::info;
use uuid::Uuid;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub credentials: Arc<CredentialStore>,
    pub orchestrator: Arc<DashboardOrchestrator>,
    pub hue: Arc<HueAdapter>,
    pub shark: Arc<SharkAdapter>,
    pub spotify: Arc<SpotifyAdapter>,
    pub spotify_auth: Arc<SpotifyAuth>,
    pub calendar: Arc<CalendarService>,
    pub google_calendar: Arc<GoogleCalendarClient>,
    pub local_events: Arc<InMemoryLocalEvents>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let credentials = Arc::new(CredentialStore::new());
        if let Some(token) = &config.shark.access_token {
            credentials.set(Credential::new(Vendor::Shark, token));
        }
        if let Some(token) = &config.spotify.access_token {
            credentials.set(Credential::new(Vendor::Spotify, token));
        }

        let govee = Arc::new(GoveeAdapter::new(config.govee.api_key.clone())?);
        let aidot = Arc::new(AiDotAdapter::new(config.aidot.device_hosts.clone())?);
        let hue = Arc::new(HueAdapter::new(
            credentials.clone(),
            config.hue.client_id.clone(),
            config.hue.client_secret.clone(),
        )?);
        let shark = Arc::new(SharkAdapter::new(
            credentials.clone(),
            config.shark.username.clone(),
            config.shark.password.clone(),
        )?);
        let spotify = Arc::new(SpotifyAdapter::new(credentials.clone())?);
        let spotify_auth = Arc::new(SpotifyAuth::new(
            config.spotify.client_id.clone(),
            config.spotify.client_secret.clone(),
        )?);

        let orchestrator = Arc::new(DashboardOrchestrator::new(vec![
            govee as Arc<dyn DeviceIntegration>,
            aidot,
            hue.clone(),
            shark.clone(),
            spotify.clone(),
        ]));

        let google_calendar = Arc::new(GoogleCalendarClient::new()?);
        let local_events = Arc::new(InMemoryLocalEvents::default());
        let calendar = Arc::new(CalendarService::new(
            local_events.clone(),
            google_calendar.clone(),
        ));

        info!(vendors = ?orchestrator.vendors(), "application context built");

        Ok(Self {
            config,
            credentials,
            orchestrator,
            hue,
            shark,
            spotify,
            spotify_auth,
            calendar,
            google_calendar,
            local_events,
        })
    }

    /// The externally-obtained Google Calendar token, if any.
    pub fn google_token(&self) -> Option<String> {
        self.config.google.access_token.clone()
    }

    /// Redirect URI for a vendor's OAuth callback, rooted at the public
    /// base URL.
    pub fn callback_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.server.public_base_url.trim_end_matches('/'))
    }
}

/// In-process store of local meal/task/reminder records. The CRUD layer
/// that owns them in the full deployment is an external collaborator; the
/// service only needs something that answers the local side of the merge.
#[derive(Debug, Default)]
pub struct InMemoryLocalEvents {
    events: RwLock<Vec<CalendarEvent>>,
}

impl InMemoryLocalEvents {
    pub fn add(
        &self,
        title: impl Into<String>,
        date: NaiveDate,
        kind: EventKind,
    ) -> CalendarEvent {
        let event = CalendarEvent {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            date,
            kind,
            source: EventSource::Local,
            person: None,
            priority: None,
        };
        let mut events = self.events.write().unwrap_or_else(|e| e.into_inner());
        events.push(event.clone());
        event
    }
}

#[async_trait]
impl LocalEventsPort for InMemoryLocalEvents {
    async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        let events = self.events.read().unwrap_or_else(|e| e.into_inner());
        Ok(events.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn context_builds_from_an_empty_config() {
        let context = AppContext::new(Config::default()).unwrap();
        assert_eq!(context.orchestrator.vendors(), Vendor::ALL.to_vec());
        assert!(!context.credentials.is_configured(Vendor::Spotify));
    }

    #[tokio::test]
    async fn configured_tokens_seed_the_store() {
        let mut config = Config::default();
        config.spotify.access_token = Some("seeded".into());
        let context = AppContext::new(config).unwrap();
        assert_eq!(context.credentials.token(Vendor::Spotify).as_deref(), Some("seeded"));
    }

    #[tokio::test]
    async fn local_events_round_trip_through_the_port() {
        let store = InMemoryLocalEvents::default();
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        store.add("Taco night", date, EventKind::Meal);

        let events = store.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, EventSource::Local);
    }

    #[test]
    fn callback_url_joins_without_double_slash() {
        let mut config = Config::default();
        config.server.public_base_url = "http://example.test:3000/".into();
        let context = AppContext::new(config).unwrap();
        assert_eq!(
            context.callback_url("/api/auth/callback/hue"),
            "http://example.test:3000/api/auth/callback/hue"
        );
    }
}

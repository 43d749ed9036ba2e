//! Port interfaces implemented by the infrastructure adapters

use async_trait::async_trait;
use hearth_domain::{
    CalendarEvent, CommandOutcome, DeviceCommand, DeviceListing, NewCalendarEvent, Result, Vendor,
};

/// Common shape every vendor adapter is normalized to: list devices, send a
/// command. Credentials are resolved inside the adapter from the credential
/// store at call time; a missing credential yields an unconfigured or mock
/// listing, never an error.
#[async_trait]
pub trait DeviceIntegration: Send + Sync {
    /// The vendor this adapter speaks for.
    fn vendor(&self) -> Vendor;

    /// Fetch the current device list from the vendor.
    async fn list_devices(&self) -> Result<DeviceListing>;

    /// Send one control command. Success means the vendor accepted it
    /// (HTTP 2xx); nothing verifies the device applied the change.
    async fn send_command(&self, command: &DeviceCommand) -> Result<CommandOutcome>;
}

/// External calendar provider operations
#[async_trait]
pub trait CalendarPort: Send + Sync {
    /// List upcoming events, already mapped into the common event shape
    /// with namespaced ids.
    async fn list_events(&self, access_token: &str) -> Result<Vec<CalendarEvent>>;

    /// Insert a single event.
    async fn create_event(&self, access_token: &str, event: &NewCalendarEvent) -> Result<String>;
}

/// Source of local meal/task/reminder records. The CRUD layer that owns
/// them is an external collaborator; the merge service only reads.
#[async_trait]
pub trait LocalEventsPort: Send + Sync {
    async fn list_events(&self) -> Result<Vec<CalendarEvent>>;
}

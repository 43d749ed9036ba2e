//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application, mostly vendor API endpoints and protocol scale factors.

// Vendor API bases
pub const GOVEE_API_BASE: &str = "https://developer-api.govee.com/v1";
pub const HUE_API_BASE: &str = "https://api.meethue.com";
pub const AYLA_API_BASE: &str = "https://sharkninja.aylanetworks.com/apiv1";
pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
pub const SPOTIFY_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

// Hue bridge-proxy brightness is reported on a 0-254 scale
pub const HUE_BRIGHTNESS_MAX: i64 = 254;

// AI Dot devices answer local status probes within this window or not at all
pub const AIDOT_TIMEOUT_SECS: u64 = 5;

// Shark operating_mode datapoint values
pub const SHARK_MODE_STOP: i64 = 0;
pub const SHARK_MODE_START: i64 = 1;
pub const SHARK_MODE_DOCK: i64 = 3;

// Calendar sync window
pub const CALENDAR_MAX_RESULTS: u32 = 50;
pub const CALENDAR_EVENT_TIMEZONE: &str = "America/New_York";

// Spotify OAuth scopes requested by every flow
pub const SPOTIFY_SCOPES: &str = "user-read-playback-state user-modify-playback-state user-read-currently-playing streaming user-read-email user-read-private";

// Hue OAuth scope
pub const HUE_SCOPES: &str = "read write";

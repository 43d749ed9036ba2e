//! External service integrations
//!
//! One module per vendor, each normalized to the `DeviceIntegration` port.
//! Adapters are mutually unaware; only the orchestrator composes them.

pub mod aidot;
pub mod google_calendar;
pub mod govee;
pub mod hue;
pub mod shark;
pub mod spotify;

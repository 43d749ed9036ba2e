//! # Hearth Core
//!
//! Ports and orchestration for the device dashboard.
//!
//! This crate contains:
//! - Port traits implemented by the infrastructure adapters
//! - The in-memory per-vendor credential store
//! - The dashboard orchestrator (fan-out, category state machine)
//! - The calendar merge service and the voice command relay
//!
//! ## Architecture
//! - Depends only on `hearth-domain`
//! - No I/O; every vendor call goes through a port trait

pub mod calendar;
pub mod credentials;
pub mod orchestrator;
pub mod ports;
pub mod voice;

// Re-export commonly used items
pub use calendar::*;
pub use credentials::*;
pub use orchestrator::*;
pub use ports::*;
pub use voice::*;

//! # Hearth Domain
//!
//! Business domain types and models for Hearth.
//!
//! This crate contains:
//! - Device, command, credential, and calendar event types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and mock fixtures
//!
//! ## Architecture
//! - No dependencies on other Hearth crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

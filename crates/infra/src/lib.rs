//! # Hearth Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP client shared by every adapter
//! - The configuration loader (env first, file fallback)
//! - Vendor adapters (Govee, AI Dot, Hue, Shark, Spotify) and the Google
//!   Calendar client
//!
//! ## Architecture
//! - Implements traits defined in `hearth-core`
//! - Contains all "impure" code (network I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::HttpClient;

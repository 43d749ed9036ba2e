//! # Hearth API
//!
//! The axum HTTP service the dashboard UI talks to.
//!
//! This crate contains:
//! - The application context (adapter wiring, credential seeding)
//! - The proxy routes in front of every vendor adapter
//! - The OAuth callback and token-bootstrap routes
//! - The health endpoint

pub mod context;
pub mod routes;

pub use context::AppContext;
pub use routes::build_router;

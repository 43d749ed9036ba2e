//! Vendor credentials
//!
//! One access token per vendor, held for the process lifetime only. There
//! is no refresh logic anywhere: an expired token simply causes the next
//! vendor call to fail until the operator re-authorizes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::device::Vendor;

/// A live access token for one vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub vendor: Vendor,
    pub token: String,
    /// Informational only; nothing acts on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(vendor: Vendor, token: impl Into<String>) -> Self {
        Self { vendor, token: token.into(), expiry: None }
    }

    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }
}

//! In-memory per-vendor credential store
//!
//! One slot per vendor, held for the process lifetime. Replaces the
//! original deployment's process-wide environment token: adapters read from
//! an explicit store that OAuth callbacks and manual paste-ins update.
//! Single-tenant by design; a multi-user deployment would key this by user.

use std::collections::HashMap;
use std::sync::RwLock;

use hearth_domain::{Credential, Vendor};

/// Shared token store. Cheap to clone behind an `Arc` at the call sites.
#[derive(Debug, Default)]
pub struct CredentialStore {
    slots: RwLock<HashMap<Vendor, Credential>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token for a vendor, if one is configured.
    pub fn token(&self, vendor: Vendor) -> Option<String> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.get(&vendor).map(|c| c.token.clone())
    }

    pub fn get(&self, vendor: Vendor) -> Option<Credential> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.get(&vendor).cloned()
    }

    /// Store a credential, replacing any previous one for the vendor.
    /// Whichever bootstrap flow ran last wins.
    pub fn set(&self, credential: Credential) {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.insert(credential.vendor, credential);
    }

    pub fn clear(&self, vendor: Vendor) {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.remove(&vendor);
    }

    pub fn is_configured(&self, vendor: Vendor) -> bool {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.contains_key(&vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_per_vendor() {
        let store = CredentialStore::new();
        store.set(Credential::new(Vendor::Spotify, "token-a"));
        store.set(Credential::new(Vendor::Spotify, "token-b"));
        assert_eq!(store.token(Vendor::Spotify).as_deref(), Some("token-b"));
    }

    #[test]
    fn vendors_are_isolated() {
        let store = CredentialStore::new();
        store.set(Credential::new(Vendor::Hue, "hue-token"));
        assert!(store.is_configured(Vendor::Hue));
        assert!(!store.is_configured(Vendor::Shark));
        assert!(store.token(Vendor::Shark).is_none());
    }

    #[test]
    fn clear_removes_only_that_vendor() {
        let store = CredentialStore::new();
        store.set(Credential::new(Vendor::Hue, "hue-token"));
        store.set(Credential::new(Vendor::Spotify, "spotify-token"));
        store.clear(Vendor::Hue);
        assert!(!store.is_configured(Vendor::Hue));
        assert!(store.is_configured(Vendor::Spotify));
    }
}

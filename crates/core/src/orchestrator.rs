//! Dashboard orchestrator
//!
//! Fan-out caller over every vendor adapter. Each vendor category runs the
//! state machine `idle -> loading -> {ready | unavailable}`, re-entered on
//! every poll or interaction. There is no caching between states and no
//! backoff on repeated failures: each refresh stands alone, and the vendor's
//! answer is always authoritative.
//!
//! A per-category generation counter guards against stale updates: a slow
//! response that completes after a newer refresh has started is discarded
//! instead of overwriting fresher state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use hearth_domain::{
    CommandOutcome, DeviceCommand, DeviceListing, HearthError, Result, Vendor,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ports::DeviceIntegration;

/// Per-category view state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CategoryState {
    Idle,
    Loading,
    Ready(DeviceListing),
    Unavailable { message: String },
}

impl CategoryState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CategoryState::Ready(_))
    }
}

struct Category {
    adapter: Arc<dyn DeviceIntegration>,
    state: RwLock<CategoryState>,
    generation: AtomicU64,
}

/// Composes the vendor adapters into one dashboard view. Adapters are
/// mutually unaware; this is the only component that sees more than one.
pub struct DashboardOrchestrator {
    categories: HashMap<Vendor, Category>,
}

impl DashboardOrchestrator {
    pub fn new(adapters: Vec<Arc<dyn DeviceIntegration>>) -> Self {
        let categories = adapters
            .into_iter()
            .map(|adapter| {
                let vendor = adapter.vendor();
                let category = Category {
                    adapter,
                    state: RwLock::new(CategoryState::Idle),
                    generation: AtomicU64::new(0),
                };
                (vendor, category)
            })
            .collect();
        Self { categories }
    }

    pub fn vendors(&self) -> Vec<Vendor> {
        let mut vendors: Vec<Vendor> = self.categories.keys().copied().collect();
        vendors.sort();
        vendors
    }

    /// Current state of one category without touching the vendor.
    pub fn state(&self, vendor: Vendor) -> Option<CategoryState> {
        self.categories
            .get(&vendor)
            .map(|c| c.state.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    /// Re-fetch one category's device list. Moves the category to loading,
    /// then to ready or unavailable. A concurrent newer refresh wins: the
    /// older response is discarded by generation comparison.
    pub async fn refresh(&self, vendor: Vendor) -> Result<CategoryState> {
        let category = self
            .categories
            .get(&vendor)
            .ok_or_else(|| HearthError::NotFound(format!("no adapter for vendor {vendor}")))?;

        let generation = category.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = category.state.write().unwrap_or_else(|e| e.into_inner());
            *state = CategoryState::Loading;
        }

        let next = match category.adapter.list_devices().await {
            Ok(listing) => {
                debug!(%vendor, devices = listing.devices.len(), source = ?listing.source, "category refreshed");
                CategoryState::Ready(listing)
            }
            Err(err) => {
                warn!(%vendor, error = %err, "category refresh failed");
                CategoryState::Unavailable { message: err.to_string() }
            }
        };

        // Discard if a newer refresh started while this one was in flight.
        if category.generation.load(Ordering::SeqCst) != generation {
            debug!(%vendor, generation, "discarding stale refresh result");
            return Ok(self
                .state(vendor)
                .unwrap_or(CategoryState::Idle));
        }

        {
            let mut state = category.state.write().unwrap_or_else(|e| e.into_inner());
            *state = next.clone();
        }
        Ok(next)
    }

    /// Refresh every category. Failures stay per-category; one vendor being
    /// down never hides another's devices.
    pub async fn refresh_all(&self) -> HashMap<Vendor, CategoryState> {
        let mut states = HashMap::new();
        for vendor in self.vendors() {
            let state = match self.refresh(vendor).await {
                Ok(state) => state,
                Err(err) => CategoryState::Unavailable { message: err.to_string() },
            };
            states.insert(vendor, state);
        }
        states
    }

    /// Send a command, then immediately re-fetch that category. No
    /// optimistic local update: the full re-fetch is the only consistency
    /// mechanism. The command is attempted even if the device id never
    /// appeared in a listing; a bad id is the vendor's failure to report.
    pub async fn send_command(&self, command: &DeviceCommand) -> Result<CommandOutcome> {
        let vendor = command.target.vendor;
        let category = self
            .categories
            .get(&vendor)
            .ok_or_else(|| HearthError::NotFound(format!("no adapter for vendor {vendor}")))?;

        let outcome = category.adapter.send_command(command).await?;

        if let Err(err) = self.refresh(vendor).await {
            warn!(%vendor, error = %err, "post-command refresh failed");
        }

        Ok(outcome)
    }
}

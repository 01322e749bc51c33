//! Registry of discovered extcap interfaces
//!
//! Maps every interface name seen during an interface listing pass to the
//! provider executable that advertised it. The first provider to claim a
//! name owns it for the lifetime of the pass; the registry is append-only
//! until the next [`InterfaceRegistry::reset`].

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Interface name -> owning provider table
///
/// The first-registration-wins rule depends on registrations being observed
/// in scan order, so a registry must only be written by one discovery pass
/// at a time.
#[derive(Debug, Default)]
pub struct InterfaceRegistry {
    providers_by_interface: RwLock<HashMap<String, PathBuf>>,
}

impl InterfaceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every registered interface
    pub fn reset(&self) {
        let mut providers = self.providers_by_interface.write();
        if !providers.is_empty() {
            info!(count = providers.len(), "Clearing extcap interface registry");
        }
        providers.clear();
    }

    /// Get the provider owning `name`
    pub fn lookup(&self, name: &str) -> Option<PathBuf> {
        self.providers_by_interface.read().get(name).cloned()
    }

    /// Check if an interface is registered
    pub fn contains(&self, name: &str) -> bool {
        self.providers_by_interface.read().contains_key(name)
    }

    /// Check if `name` is registered and owned by `provider`
    pub fn is_owned_by(&self, name: &str, provider: &Path) -> bool {
        self.providers_by_interface
            .read()
            .get(name)
            .is_some_and(|owner| owner == provider)
    }

    /// Register `name` as provided by `provider`
    ///
    /// Returns `false` and leaves the existing owner in place when the name
    /// is already registered.
    pub fn register<S: Into<String>, P: Into<PathBuf>>(&self, name: S, provider: P) -> bool {
        let name = name.into();
        let mut providers = self.providers_by_interface.write();

        if providers.contains_key(&name) {
            return false;
        }

        let provider = provider.into();
        debug!(interface = %name, provider = %provider.display(), "Registering extcap interface");
        providers.insert(name, provider);
        true
    }

    /// Get the number of registered interfaces
    pub fn len(&self) -> usize {
        self.providers_by_interface.read().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers_by_interface.read().is_empty()
    }
}

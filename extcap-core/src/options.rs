//! Capture session entries
//!
//! These records belong to the capture configuration store. The orchestrator
//! reads `kind`, `name`, `provider_path` and `extra_arguments`, and only ever
//! writes `pipe_path` and `process`.

use crate::{InterfaceKind, ProviderProcess};
use std::collections::HashMap;
use std::path::PathBuf;

/// One configured capture interface
#[derive(Debug)]
pub struct InterfaceOptions {
    /// Interface name
    pub name: String,
    /// Native or extcap; native entries are ignored by the orchestrator
    pub kind: InterfaceKind,
    /// Provider executable, set by discovery for extcap interfaces
    pub provider_path: Option<PathBuf>,
    /// Provider options as flag -> value; flags without a value are passed alone
    pub extra_arguments: HashMap<String, Option<String>>,
    /// Pipe or FIFO the provider writes into, set when the session starts
    pub pipe_path: Option<PathBuf>,
    /// Spawned provider, `None` when no valid process is attached
    pub process: Option<ProviderProcess>,
}

impl InterfaceOptions {
    /// Create an entry for a native interface
    pub fn native<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: InterfaceKind::Native,
            provider_path: None,
            extra_arguments: HashMap::new(),
            pipe_path: None,
            process: None,
        }
    }

    /// Create an entry for an interface owned by the provider at `provider_path`
    pub fn extcap<S: Into<String>, P: Into<PathBuf>>(name: S, provider_path: P) -> Self {
        Self {
            name: name.into(),
            kind: InterfaceKind::Extcap,
            provider_path: Some(provider_path.into()),
            extra_arguments: HashMap::new(),
            pipe_path: None,
            process: None,
        }
    }

    /// Add a provider option
    pub fn with_argument<K: Into<String>>(mut self, key: K, value: Option<String>) -> Self {
        self.extra_arguments.insert(key.into(), value);
        self
    }

    /// Is this an extcap interface?
    pub fn is_extcap(&self) -> bool {
        self.kind == InterfaceKind::Extcap
    }

    /// Process id of the attached provider, if any
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(ProviderProcess::id)
    }
}

/// Interfaces configured for one capture session
#[derive(Debug, Default)]
pub struct CaptureOptions {
    /// Configured interfaces in configuration order
    pub interfaces: Vec<InterfaceOptions>,
}

impl CaptureOptions {
    pub fn new(interfaces: Vec<InterfaceOptions>) -> Self {
        Self { interfaces }
    }

    /// Iterate over the extcap entries only
    pub fn extcap_interfaces(&self) -> impl Iterator<Item = &InterfaceOptions> {
        self.interfaces.iter().filter(|iface| iface.is_extcap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        let native = InterfaceOptions::native("eth0");
        assert!(!native.is_extcap());
        assert!(native.provider_path.is_none());

        let extcap = InterfaceOptions::extcap("randpkt", "/extcap/randpktdump")
            .with_argument("--delay", Some("3".to_string()))
            .with_argument("--all-random", None);
        assert!(extcap.is_extcap());
        assert_eq!(extcap.extra_arguments.len(), 2);
        assert_eq!(extcap.pid(), None);
    }

    #[test]
    fn test_extcap_interfaces_filter() {
        let options = CaptureOptions::new(vec![
            InterfaceOptions::native("eth0"),
            InterfaceOptions::extcap("randpkt", "/extcap/randpktdump"),
            InterfaceOptions::native("lo"),
        ]);

        let names: Vec<&str> = options
            .extcap_interfaces()
            .map(|iface| iface.name.as_str())
            .collect();
        assert_eq!(names, vec!["randpkt"]);
    }
}

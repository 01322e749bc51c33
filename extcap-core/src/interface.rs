//! Capture interface descriptors

use std::fmt;
use std::path::PathBuf;

/// Where a capture interface comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// Enumerated natively by the host capture library
    Native,
    /// Advertised by an extcap provider
    Extcap,
}

/// Interface as reported by a provider's `--extcap-interfaces` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Name used to address the interface (`--extcap-interface <call>`)
    pub call: String,
    /// Human-readable name
    pub display: String,
}

impl InterfaceRecord {
    pub fn new<C: Into<String>, D: Into<String>>(call: C, display: D) -> Self {
        Self {
            call: call.into(),
            display: display.into(),
        }
    }
}

/// Interface discovered during an interface listing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    /// Interface name, unique within a listing pass
    pub name: String,
    /// Human-readable name
    pub friendly_name: String,
    /// Executable of the provider that owns this interface
    pub provider_path: PathBuf,
    /// Interface kind; always [`InterfaceKind::Extcap`] for discovered interfaces
    pub kind: InterfaceKind,
}

impl InterfaceDescriptor {
    /// Create a descriptor for an interface owned by `provider_path`
    pub fn extcap(record: &InterfaceRecord, provider_path: PathBuf) -> Self {
        Self {
            name: record.call.clone(),
            friendly_name: record.display.clone(),
            provider_path,
            kind: InterfaceKind::Extcap,
        }
    }
}

impl fmt::Display for InterfaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) via {}",
            self.name,
            self.friendly_name,
            self.provider_path.display()
        )
    }
}

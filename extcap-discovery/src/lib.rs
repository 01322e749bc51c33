//! Extcap provider discovery
//!
//! This crate discovers external capture providers and queries them:
//!
//! - `ProcessInvoker`: runs one provider to completion and buffers its output
//! - `Scanner`: walks the provider directory, skipping providers that fail
//! - `InterfaceRegistry`: interface name -> owning provider, first claim wins
//! - `ExtcapDiscovery`: interface listing, link type and configuration queries
//!
//! # Example
//!
//! ```no_run
//! use extcap_core::{ArgumentDescriptor, ExtcapConfig, InterfaceRecord, LinkTypeRecord, OutputParser};
//! use extcap_discovery::ExtcapDiscovery;
//!
//! struct SentenceParser;
//!
//! impl OutputParser for SentenceParser {
//!     fn parse_interfaces(&self, _output: &str) -> Vec<InterfaceRecord> { Vec::new() }
//!     fn parse_link_types(&self, _output: &str) -> Vec<LinkTypeRecord> { Vec::new() }
//!     fn parse_arguments(&self, _output: &str) -> Vec<ArgumentDescriptor> { Vec::new() }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let discovery = ExtcapDiscovery::new(ExtcapConfig::from_env()?, SentenceParser);
//! for iface in discovery.list_interfaces() {
//!     println!("{}", iface);
//! }
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod invoker;
pub mod registry;
pub mod scanner;

pub use discovery::ExtcapDiscovery;
pub use invoker::{run_provider, Invoker, ProcessInvoker, ProviderOutput};
pub use registry::InterfaceRegistry;
pub use scanner::{ScanControl, ScanReport, Scanner};

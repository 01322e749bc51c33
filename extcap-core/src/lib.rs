//! extcap core library
//!
//! This crate provides the data model, error handling and configuration
//! shared by extcap discovery and extcap capture session management:
//!
//! - Interface descriptors and the records parsed from provider output
//! - Interface capabilities (link types)
//! - Configuration argument descriptors
//! - Capture session entries and the spawned provider handle
//! - The [`OutputParser`] seam to the provider output grammar

pub mod argument;
pub mod capability;
pub mod config;
pub mod error;
pub mod interface;
pub mod options;
pub mod parser;
pub mod process;
pub mod types;

// Re-export commonly used types
pub use argument::{ArgType, ArgValue, ArgumentDescriptor, ValueOption};
pub use capability::{Capabilities, DataLinkInfo, LinkTypeRecord};
pub use config::ExtcapConfig;
pub use error::{Error, Result};
pub use interface::{InterfaceDescriptor, InterfaceKind, InterfaceRecord};
pub use options::{CaptureOptions, InterfaceOptions};
pub use parser::OutputParser;
pub use process::ProviderProcess;
pub use types::arguments;

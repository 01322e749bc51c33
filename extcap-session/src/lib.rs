//! Extcap live-capture sessions
//!
//! This crate starts extcap providers for a live capture and tears them
//! down afterwards.
//!
//! ## Features
//!
//! - **Pipes**: FIFOs with owner-only permissions on unix, message-mode named pipes on windows
//! - **Fire-and-forget spawning**: providers run detached while the capture engine reads the pipe
//! - **Idempotent cleanup**: safe to call after success, failure, or a previous cleanup
//!
//! ## Example
//!
//! ```no_run
//! use extcap_core::{CaptureOptions, ExtcapConfig, InterfaceOptions};
//! use extcap_session::SessionManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = SessionManager::new(&ExtcapConfig::from_env()?)?;
//! let mut options = CaptureOptions::new(vec![
//!     InterfaceOptions::extcap("randpkt", "/usr/lib/wireshark/extcap/randpktdump")
//!         .with_argument("--delay", Some("3".to_string())),
//! ]);
//!
//! let started = manager.start_sessions(&mut options);
//! // ... read frames from options.interfaces[0].pipe_path ...
//! manager.cleanup_sessions(&mut options);
//! started?;
//! # Ok(())
//! # }
//! ```

pub mod pipe;
pub mod session;

pub use pipe::{PipeFactory, PlatformPipeFactory};
pub use session::{capture_arguments, SessionManager};

#[cfg(unix)]
pub use pipe::FifoFactory;
#[cfg(windows)]
pub use pipe::NamedPipeFactory;

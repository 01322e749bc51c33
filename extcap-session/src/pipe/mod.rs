//! Pipes that carry captured frames from a provider to the capture engine
//!
//! Each platform has one [`PipeFactory`]: FIFOs in a temporary directory on
//! unix, named pipes on windows. Either way the factory hands back a path
//! the provider is told to write into (`--fifo <path>`).

use extcap_core::Result;
use std::path::{Path, PathBuf};

#[cfg(unix)]
mod fifo;
#[cfg(unix)]
pub use fifo::FifoFactory;

#[cfg(windows)]
mod named;
#[cfg(windows)]
pub use named::NamedPipeFactory;

/// Pipe factory used by default on this platform
#[cfg(unix)]
pub type PlatformPipeFactory = FifoFactory;

/// Pipe factory used by default on this platform
#[cfg(windows)]
pub type PlatformPipeFactory = NamedPipeFactory;

/// Creates and tears down capture pipes
pub trait PipeFactory: Send + Sync {
    /// Create a new pipe and return the path the provider writes into
    fn create(&self) -> Result<PathBuf>;

    /// Tear down a pipe created by [`PipeFactory::create`]
    ///
    /// Must be a no-op for pipes that are already gone.
    fn release(&self, path: &Path);
}

//! Handle for a provider spawned for live capture

use std::fmt;
use std::io;
use std::process::Child;
use tracing::{debug, warn};

/// Spawned provider process
///
/// The orchestrator never waits on a live-capture provider while the
/// capture runs. Releasing the handle stops a provider that is still
/// running and reaps it, so it never lingers as a zombie.
pub struct ProviderProcess {
    child: Child,
}

impl ProviderProcess {
    /// Wrap a freshly spawned child process
    pub fn new(child: Child) -> Self {
        Self { child }
    }

    /// OS process identifier
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Check whether the provider has exited, reaping it if so
    pub fn has_exited(&mut self) -> crate::Result<bool> {
        Ok(self.child.try_wait()?.is_some())
    }

    /// Stop the provider if it is still running and reap it
    pub fn release(mut self) {
        let pid = self.child.id();

        match self.child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid = pid, status = %status, "Extcap process already exited");
                return;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(pid = pid, error = %e, "Failed to query extcap process status");
            }
        }

        debug!(pid = pid, "Stopping extcap process");
        match self.child.kill() {
            Ok(()) => {}
            // Exited between try_wait and kill
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => {
                warn!(pid = pid, error = %e, "Failed to stop extcap process");
                return;
            }
        }

        match self.child.wait() {
            Ok(status) => debug!(pid = pid, status = %status, "Extcap process reaped"),
            Err(e) => warn!(pid = pid, error = %e, "Failed to reap extcap process"),
        }
    }
}

impl fmt::Debug for ProviderProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderProcess")
            .field("pid", &self.child.id())
            .finish()
    }
}

use super::PipeFactory;
use extcap_core::{Error, ExtcapConfig, Result};
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// FIFO special files with owner-only permissions
#[derive(Debug, Clone)]
pub struct FifoFactory {
    dir: PathBuf,
    prefix: String,
}

impl FifoFactory {
    /// Create FIFOs in the configured FIFO directory
    pub fn new(config: &ExtcapConfig) -> Result<Self> {
        Ok(Self {
            dir: config.fifo_dir(),
            prefix: config.pipe_prefix.clone(),
        })
    }

    /// Directory FIFOs are created in
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PipeFactory for FifoFactory {
    fn create(&self) -> Result<PathBuf> {
        // A temporary file reserves a unique name; its descriptor is closed right away
        let path = tempfile::Builder::new()
            .prefix(&format!("{}_", self.prefix))
            .tempfile_in(&self.dir)
            .and_then(|file| file.into_temp_path().keep().map_err(io::Error::from))
            .map_err(|e| {
                error!(dir = %self.dir.display(), error = %e, "Cannot reserve fifo name");
                Error::pipe(format!("cannot reserve fifo name in {}: {}", self.dir.display(), e))
            })?;

        debug!(fifo = %path.display(), "Creating fifo");

        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                Error::pipe(format!("cannot remove {}: {}", path.display(), e))
            })?;
        }

        mkfifo(&path, Mode::S_IRUSR | Mode::S_IWUSR).map_err(|e| {
            error!(fifo = %path.display(), error = %e, "Error creating fifo");
            Error::pipe(format!("mkfifo {}: {}", path.display(), e))
        })?;

        Ok(path)
    }

    fn release(&self, path: &Path) {
        if !path.exists() {
            return;
        }

        debug!(fifo = %path.display(), "Removing fifo");
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(fifo = %path.display(), error = %e, "Cannot remove fifo");
            }
        }
    }
}

//! Orchestrator configuration

use crate::types::{EXTCAP_PIPE_PREFIX, PIPE_BUFFER_SIZE, PIPE_MAX_INSTANCES};
use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable naming the provider directory
pub const EXTCAP_DIR_ENV: &str = "EXTCAP_DIR";

/// Configuration shared by discovery and session management
#[derive(Debug, Clone)]
pub struct ExtcapConfig {
    /// Directory scanned for provider executables (non-recursive)
    pub provider_dir: PathBuf,
    /// Prefix for pipe and FIFO names
    pub pipe_prefix: String,
    /// Directory FIFOs are created in (system temp dir when unset)
    pub fifo_dir: Option<PathBuf>,
    /// Maximum instances of one named pipe
    pub pipe_max_instances: usize,
    /// Named pipe in/out buffer size in bytes
    pub pipe_buffer_size: u32,
}

impl Default for ExtcapConfig {
    fn default() -> Self {
        Self {
            provider_dir: PathBuf::from("extcap"),
            pipe_prefix: EXTCAP_PIPE_PREFIX.to_string(),
            fifo_dir: None,
            pipe_max_instances: PIPE_MAX_INSTANCES,
            pipe_buffer_size: PIPE_BUFFER_SIZE,
        }
    }
}

impl ExtcapConfig {
    /// Create a configuration scanning `provider_dir`
    pub fn new<P: Into<PathBuf>>(provider_dir: P) -> Self {
        Self {
            provider_dir: provider_dir.into(),
            ..Self::default()
        }
    }

    /// Resolve the provider directory from `EXTCAP_DIR`
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(EXTCAP_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::new(dir)),
            _ => Err(Error::config(format!("{} is not set", EXTCAP_DIR_ENV))),
        }
    }

    pub fn with_pipe_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.pipe_prefix = prefix.into();
        self
    }

    pub fn with_fifo_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.fifo_dir = Some(dir.into());
        self
    }

    /// Directory FIFOs are created in
    pub fn fifo_dir(&self) -> PathBuf {
        self.fifo_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Check the configuration for values no provider could work with
    pub fn validate(&self) -> Result<()> {
        if self.provider_dir.as_os_str().is_empty() {
            return Err(Error::config("provider directory is empty"));
        }
        if self.pipe_prefix.is_empty() {
            return Err(Error::config("pipe prefix is empty"));
        }
        if self.pipe_max_instances == 0 {
            return Err(Error::config("pipe instance limit must be at least 1"));
        }
        Ok(())
    }
}

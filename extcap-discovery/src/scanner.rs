//! Provider directory scanning
//!
//! Every entry of the provider directory is a candidate provider; there is
//! no extension or permission filtering. Candidates are invoked one after
//! the other and each successful response is handed to a callback that
//! decides whether scanning continues.

use crate::invoker::{run_provider, Invoker};
use crate::registry::InterfaceRegistry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decision returned by a scan callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    /// Invoke the next candidate
    Continue,
    /// Stop scanning after this response
    Stop,
}

/// Outcome of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Candidates that were invoked
    pub invoked: usize,
    /// Candidates whose response reached the callback
    pub responded: usize,
    /// Last failure seen while scanning, for the caller to surface
    pub last_error: Option<String>,
}

/// Scans a provider directory with one argument vector
pub struct Scanner<'a, I: ?Sized> {
    provider_dir: &'a Path,
    invoker: &'a I,
    registry: &'a InterfaceRegistry,
}

impl<'a, I: Invoker + ?Sized> Scanner<'a, I> {
    pub fn new(provider_dir: &'a Path, invoker: &'a I, registry: &'a InterfaceRegistry) -> Self {
        Self {
            provider_dir,
            invoker,
            registry,
        }
    }

    /// List candidate providers, ordered by file name
    pub fn candidates(&self) -> io::Result<Vec<PathBuf>> {
        list_candidates(&absolute_dir(self.provider_dir)?)
    }

    /// Invoke every candidate with `args` until the callback says stop
    ///
    /// With `filter_interface` set, candidates other than the registered
    /// owner of that interface are skipped; an interface that is not
    /// registered yet does not filter anything. Candidates that fail to run
    /// or exit unsuccessfully are skipped.
    pub fn scan<F>(&self, args: &[&str], filter_interface: Option<&str>, mut callback: F) -> ScanReport
    where
        F: FnMut(&Path, &str) -> ScanControl,
    {
        let mut report = ScanReport::default();

        // Providers run with the directory as working dir, so paths must not be relative
        let listing = absolute_dir(self.provider_dir)
            .and_then(|dir| list_candidates(&dir).map(|candidates| (dir, candidates)));

        let (working_dir, candidates) = match listing {
            Ok(listing) => listing,
            Err(e) => {
                warn!(
                    dir = %self.provider_dir.display(),
                    error = %e,
                    "Cannot read extcap directory"
                );
                report.last_error = Some(format!(
                    "Cannot read extcap directory {}: {}",
                    self.provider_dir.display(),
                    e
                ));
                return report;
            }
        };

        let owner = filter_interface.and_then(|name| self.registry.lookup(name));

        for provider in candidates {
            if let Some(owner) = &owner {
                if *owner != provider {
                    continue;
                }
            }

            report.invoked += 1;
            let output = match run_provider(self.invoker, &provider, args, &working_dir) {
                Ok(output) => output,
                Err(e) => {
                    debug!(provider = %provider.display(), error = %e, "Skipping extcap");
                    report.last_error = Some(e.to_string());
                    continue;
                }
            };

            report.responded += 1;
            if callback(&provider, &output) == ScanControl::Stop {
                break;
            }
        }

        report
    }
}

fn list_candidates(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut candidates = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    candidates.sort();
    Ok(candidates)
}

fn absolute_dir(dir: &Path) -> io::Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

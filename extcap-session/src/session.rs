//! Live-capture session lifecycle
//!
//! [`SessionManager::start_sessions`] gives every extcap entry of a capture
//! configuration its own pipe and provider process;
//! [`SessionManager::cleanup_sessions`] tears both down again once the
//! capture is over, whether it succeeded or not.

use crate::pipe::{PipeFactory, PlatformPipeFactory};
use extcap_core::arguments;
use extcap_core::{CaptureOptions, Error, ExtcapConfig, InterfaceOptions, ProviderProcess, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, error, info, warn};

/// Build the live-capture arguments for `entry`, without the program path
///
/// Extra arguments follow the fixed prefix ordered by flag, each flag
/// followed by its value when it has one.
pub fn capture_arguments(entry: &InterfaceOptions, pipe_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        arguments::RUN_CAPTURE.into(),
        arguments::INTERFACE.into(),
        entry.name.as_str().into(),
        arguments::RUN_PIPE.into(),
        pipe_path.into(),
    ];

    let mut extra: Vec<_> = entry.extra_arguments.iter().collect();
    extra.sort_by(|a, b| a.0.cmp(b.0));

    for (key, value) in extra {
        args.push(key.as_str().into());
        if let Some(value) = value {
            args.push(value.as_str().into());
        }
    }

    args
}

/// Starts and stops extcap providers for live captures
pub struct SessionManager<F = PlatformPipeFactory> {
    factory: F,
}

impl SessionManager<PlatformPipeFactory> {
    /// Create a manager using this platform's pipe mechanism
    pub fn new(config: &ExtcapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_factory(PlatformPipeFactory::new(config)?))
    }
}

#[cfg(windows)]
impl SessionManager<crate::pipe::NamedPipeFactory> {
    /// Take the server end of the pipe a provider is writing into
    pub fn take_pipe_server(
        &self,
        pipe_path: &Path,
    ) -> Option<tokio::net::windows::named_pipe::NamedPipeServer> {
        self.factory.take_server(pipe_path)
    }
}

impl<F: PipeFactory> SessionManager<F> {
    /// Create a manager using a specific pipe factory
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    /// Get the pipe factory
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Create a pipe and spawn the provider for every extcap entry
    ///
    /// Entries are handled in configuration order. A pipe that cannot be
    /// created fails the whole call right away; entries started before it
    /// keep their pipe and process so that [`Self::cleanup_sessions`] can
    /// tear them down. A provider that cannot be spawned leaves its entry
    /// without a process.
    pub fn start_sessions(&self, options: &mut CaptureOptions) -> Result<()> {
        for entry in options.interfaces.iter_mut().filter(|e| e.is_extcap()) {
            let pipe_path = self.factory.create().map_err(|e| {
                error!(interface = %entry.name, error = %e, "Cannot create capture pipe");
                e
            })?;
            debug!(interface = %entry.name, pipe = %pipe_path.display(), "Capture pipe ready");

            let args = capture_arguments(entry, &pipe_path);
            entry.pipe_path = Some(pipe_path);

            if let Some(previous) = entry.process.take() {
                previous.release();
            }

            match spawn_provider(entry, &args) {
                Ok(process) => {
                    info!(
                        interface = %entry.name,
                        pid = process.id(),
                        "Started extcap capture"
                    );
                    entry.process = Some(process);
                }
                Err(e) => {
                    warn!(interface = %entry.name, error = %e, "Cannot start extcap capture");
                }
            }
        }

        Ok(())
    }

    /// Release the pipe and process of every extcap entry
    ///
    /// Pipes that are already gone and processes that were already released
    /// are skipped, so calling this more than once is harmless. Pipe paths
    /// stay recorded on the entries.
    pub fn cleanup_sessions(&self, options: &mut CaptureOptions) {
        for entry in options.interfaces.iter_mut().filter(|e| e.is_extcap()) {
            debug!(
                interface = %entry.name,
                pipe = ?entry.pipe_path,
                pid = ?entry.pid(),
                "Cleaning up extcap session"
            );

            if let Some(pipe_path) = &entry.pipe_path {
                self.factory.release(pipe_path);
            }

            if let Some(process) = entry.process.take() {
                debug!(pid = process.id(), "Releasing extcap process");
                process.release();
            }
        }
    }
}

fn spawn_provider(entry: &InterfaceOptions, args: &[OsString]) -> Result<ProviderProcess> {
    let provider = entry
        .provider_path
        .as_deref()
        .ok_or_else(|| Error::NotFound(format!("extcap for interface '{}'", entry.name)))?;

    debug!(provider = %provider.display(), args = ?args, "Spawning extcap");

    let child = Command::new(provider)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::provider_failed(provider, None, e.to_string()))?;

    Ok(ProviderProcess::new(child))
}

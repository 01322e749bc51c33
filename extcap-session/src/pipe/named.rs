use super::PipeFactory;
use chrono::Local;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use extcap_core::{Error, ExtcapConfig, Result};
use std::io;
use std::path::{Path, PathBuf};
use tokio::net::windows::named_pipe::{NamedPipeServer, PipeMode, ServerOptions};
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::{debug, error, warn};

/// Names tried per pipe before giving up
const MAX_NAME_ATTEMPTS: u32 = 16;

/// Inbound message-mode named pipes
///
/// The server end of every pipe stays with the factory until the capture
/// engine takes it with [`NamedPipeFactory::take_server`]; whatever is
/// still held at release time is disconnected and closed.
pub struct NamedPipeFactory {
    prefix: String,
    max_instances: usize,
    buffer_size: u32,
    servers: DashMap<PathBuf, NamedPipeServer>,
    handle: Handle,
    // Owned only when no runtime was running at construction
    _runtime: Option<Runtime>,
}

impl NamedPipeFactory {
    /// Create a factory bound to the current tokio runtime, or to a private one
    pub fn new(config: &ExtcapConfig) -> Result<Self> {
        let (handle, runtime) = match Handle::try_current() {
            Ok(handle) => (handle, None),
            Err(_) => {
                let runtime = Builder::new_current_thread().enable_io().build()?;
                (runtime.handle().clone(), Some(runtime))
            }
        };

        Ok(Self {
            prefix: config.pipe_prefix.clone(),
            max_instances: config.pipe_max_instances,
            buffer_size: config.pipe_buffer_size,
            servers: DashMap::new(),
            handle,
            _runtime: runtime,
        })
    }

    /// Take ownership of the server end of a pipe
    pub fn take_server(&self, path: &Path) -> Option<NamedPipeServer> {
        self.servers.remove(path).map(|(_, server)| server)
    }

    fn pipe_name(&self, attempt: u32) -> String {
        let base = format!(
            r"\\.\pipe\{}_{}",
            self.prefix,
            Local::now().format("%Y%m%d%H%M%S")
        );
        // Timestamps only have one-second resolution
        if attempt == 0 {
            base
        } else {
            format!("{}_{}", base, attempt)
        }
    }

    fn create_server(&self, name: &str) -> io::Result<NamedPipeServer> {
        ServerOptions::new()
            .first_pipe_instance(true)
            .access_inbound(true)
            .access_outbound(true)
            .pipe_mode(PipeMode::Message)
            .max_instances(self.max_instances)
            .in_buffer_size(self.buffer_size)
            .out_buffer_size(self.buffer_size)
            .create(name)
    }
}

impl PipeFactory for NamedPipeFactory {
    fn create(&self) -> Result<PathBuf> {
        let _guard = self.handle.enter();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = self.pipe_name(attempt);
            let Entry::Vacant(slot) = self.servers.entry(PathBuf::from(&name)) else {
                continue;
            };

            debug!(pipe = %name, "Creating named pipe");

            match self.create_server(&name) {
                Ok(server) => {
                    let path = slot.key().clone();
                    slot.insert(server);
                    return Ok(path);
                }
                // Another pipe of that name exists outside this factory
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => continue,
                Err(e) => {
                    error!(pipe = %name, error = %e, "Error creating pipe");
                    return Err(Error::pipe(format!("{}: {}", name, e)));
                }
            }
        }

        error!(prefix = %self.prefix, "No free pipe name");
        Err(Error::pipe(format!(
            "no free pipe name for prefix {} after {} attempts",
            self.prefix, MAX_NAME_ATTEMPTS
        )))
    }

    fn release(&self, path: &Path) {
        if let Some((_, server)) = self.servers.remove(path) {
            let _guard = self.handle.enter();
            debug!(pipe = %path.display(), "Disconnecting named pipe");
            if let Err(e) = server.disconnect() {
                warn!(pipe = %path.display(), error = %e, "Cannot disconnect pipe");
            }
        }
    }
}

//! Synchronous provider invocation
//!
//! Discovery runs each candidate provider to completion and buffers its
//! whole standard output before anything is parsed. No timeout is applied:
//! a provider that hangs blocks discovery for its own slot only.

use extcap_core::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Result of running a provider to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Everything the provider wrote to standard output
    pub stdout: String,
}

impl ProviderOutput {
    /// Did the provider exit with status 0?
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs provider executables for discovery queries
pub trait Invoker: Send + Sync {
    /// Run `program` with `args` in `working_dir` and wait for it to exit
    ///
    /// An error means the process could not be started at all; a started
    /// process is reported through [`ProviderOutput`] whatever its exit code.
    fn invoke(&self, program: &Path, args: &[&str], working_dir: &Path) -> Result<ProviderOutput>;
}

/// [`Invoker`] that spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl Invoker for ProcessInvoker {
    fn invoke(&self, program: &Path, args: &[&str], working_dir: &Path) -> Result<ProviderOutput> {
        debug!(provider = %program.display(), args = ?args, "Invoking extcap");

        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Error::provider_failed(program, None, e.to_string()))?;

        Ok(ProviderOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Run a provider and return its output, treating a non-zero exit as failure
pub fn run_provider<I: Invoker + ?Sized>(
    invoker: &I,
    program: &Path,
    args: &[&str],
    working_dir: &Path,
) -> Result<String> {
    let output = invoker.invoke(program, args, working_dir)?;

    if !output.success() {
        return Err(Error::provider_failed(
            program,
            output.exit_code,
            "unsuccessful exit",
        ));
    }

    Ok(output.stdout)
}

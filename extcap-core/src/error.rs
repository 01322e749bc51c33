//! Error types for the extcap orchestrator

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extcap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the extcap orchestrator
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem or process I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interface is not registered by any provider
    #[error("Interface '{0}' is not provided by any extcap")]
    InterfaceNotFound(String),

    /// Provider could not be spawned or exited unsuccessfully
    #[error("Extcap '{}' failed{}: {reason}", .provider.display(), exit_suffix(.exit_code))]
    ProviderFailed {
        provider: PathBuf,
        exit_code: Option<i32>,
        reason: String,
    },

    /// Provider answered a link type query without any link types
    #[error("Extcap returned no DLTs")]
    NoLinkTypes { interface: String },

    /// Provider answered a configuration query without any arguments
    #[error("Extcap returned no arguments for '{interface}'")]
    NoArguments { interface: String },

    /// Pipe or FIFO creation error
    #[error("Pipe creation error: {0}")]
    Pipe(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

impl Error {
    /// Create a pipe error with a custom message
    pub fn pipe<S: Into<String>>(msg: S) -> Self {
        Error::Pipe(msg.into())
    }

    /// Create a configuration error with a custom message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a provider failure
    pub fn provider_failed<P, S>(provider: P, exit_code: Option<i32>, reason: S) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Error::ProviderFailed {
            provider: provider.into(),
            exit_code,
            reason: reason.into(),
        }
    }
}

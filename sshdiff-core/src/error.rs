//! Error types for sshdiff-core.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the remote channel itself (transport, not command output).
///
/// A remote command that runs and prints an error is *not* a `ChannelError`;
/// its text is classified by the hash oracle instead.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The command could not be started or its output could not be collected.
    #[error("remote command `{command}` failed: {reason}")]
    Exec { command: String, reason: String },

    /// A remote file could not be streamed back.
    #[error("remote transfer of {path} failed: {reason}")]
    Transfer { path: String, reason: String },

    /// Local side of a transfer (the sink) failed.
    #[error("I/O error on remote channel: {0}")]
    Io(#[from] std::io::Error),

    /// The session was torn down before the operation.
    #[error("remote session is closed")]
    Closed,
}

/// All errors that can arise from host-profile configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure while reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with the offending file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

//! Error types for sshdiff-compare.

use std::path::PathBuf;

use thiserror::Error;

use sshdiff_core::ChannelError;

/// Errors that can escape a comparison, or a single hash/transfer step.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The remote channel broke; the run cannot continue.
    #[error("remote channel error: {0}")]
    Channel(#[from] ChannelError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`CompareError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CompareError {
    CompareError::Io {
        path: path.into(),
        source,
    }
}

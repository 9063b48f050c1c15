use std::path::PathBuf;

use thiserror::Error;

/// Error surface for establishing an SSH session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unable to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SSH handshake with {addr} failed: {source}")]
    Handshake {
        addr: String,
        #[source]
        source: ssh2::Error,
    },

    #[error("unable to authenticate as '{user}' using key {private_key}: {reason}")]
    Auth {
        user: String,
        private_key: PathBuf,
        reason: String,
    },

    #[error("SSH error: {0}")]
    Ssh(#[from] ssh2::Error),
}

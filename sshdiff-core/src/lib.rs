//! sshdiff core library — domain types, the remote channel capability,
//! host-profile configuration, errors.
//!
//! Public API surface:
//! - [`types`] — paths, hashes, probe results, outcomes, tallies
//! - [`channel`] — [`RemoteChannel`], the single remote command seam
//! - [`config`] — `~/.sshdiff/hosts.yaml` loading
//! - [`error`] — [`ChannelError`], [`ConfigError`]

pub mod channel;
pub mod config;
pub mod error;
pub mod types;

pub use channel::RemoteChannel;
pub use error::{ChannelError, ConfigError};
pub use types::{
    ContentHash, DiffOutcome, FileRecord, RelativePath, RemoteProbeResult, RunStatus, RunTally,
    TraversalContext,
};

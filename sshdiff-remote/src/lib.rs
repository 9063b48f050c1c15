//! SSH implementation of [`sshdiff_core::RemoteChannel`].
//!
//! One blocking libssh2 session per run: public-key file authentication,
//! one exec channel per command, SCP for file retrieval.

mod error;
mod session;

pub use error::SessionError;
pub use session::{SshChannel, SshTarget, DEFAULT_PORT};

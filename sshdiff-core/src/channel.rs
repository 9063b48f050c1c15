//! The remote command channel capability.

use std::io::Write;

use crate::error::ChannelError;

/// A single, ordered, request/response connection to the remote host.
///
/// Exactly one command is outstanding at a time, which `&mut self` enforces.
/// Implementations must not be shared across threads without external
/// serialisation.
pub trait RemoteChannel {
    /// Run one shell command and return its full output text.
    ///
    /// Blocks until the output stream is drained. Non-UTF-8 bytes are
    /// replaced lossily.
    fn run(&mut self, command: &str) -> Result<String, ChannelError>;

    /// Stream the bytes of `remote_path` into `sink`, returning the byte count.
    fn fetch(&mut self, remote_path: &str, sink: &mut dyn Write) -> Result<u64, ChannelError>;

    /// End the session. Called once, after the last command.
    fn logout(&mut self) -> Result<(), ChannelError>;
}

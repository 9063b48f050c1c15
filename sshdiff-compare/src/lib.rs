//! # sshdiff-compare
//!
//! Recursive local-vs-remote tree comparison over a [`RemoteChannel`].
//!
//! Call [`compare`] to walk the whole tree, classify every regular file,
//! mirror divergent files when configured, and end the remote session.

pub mod classify;
pub mod error;
pub mod hash;
pub mod oracle;
pub mod report;
pub mod transfer;
pub mod walker;

pub use classify::{classify, classify_unreadable};
pub use error::CompareError;
pub use oracle::probe;
pub use report::{summary_block, summary_text, Event, Reporter, Summary};
pub use walker::walk;

use sshdiff_core::{RelativePath, RemoteChannel, RunTally, TraversalContext};

/// Compare the whole tree rooted at `ctx.local_root`, then log out.
///
/// Logout runs on every exit path; a logout failure after a successful walk
/// is only logged.
pub fn compare(
    channel: &mut dyn RemoteChannel,
    ctx: &TraversalContext,
    reporter: &mut dyn Reporter,
) -> Result<RunTally, CompareError> {
    let result = walk(channel, ctx, &RelativePath::root(), reporter);

    if let Err(err) = channel.logout() {
        tracing::warn!("logout failed: {err}");
    }

    let tally = result?;
    tracing::info!(
        "comparison finished: {} difference(s), {} permission issue(s)",
        tally.differences,
        tally.permission_issues
    );
    Ok(tally)
}

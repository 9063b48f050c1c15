//! Per-file diff classification.

use sshdiff_core::{ContentHash, DiffOutcome, RemoteProbeResult};

/// Derive the outcome for one file. Hash equality is exact string equality.
pub fn classify(local_hash: &ContentHash, remote: &RemoteProbeResult) -> DiffOutcome {
    match remote {
        RemoteProbeResult::PermissionDenied => DiffOutcome::PermissionIssue,
        RemoteProbeResult::NotFound => DiffOutcome::Missing,
        RemoteProbeResult::Hash(remote_hash) if remote_hash == local_hash => DiffOutcome::Match,
        RemoteProbeResult::Hash(_) => DiffOutcome::Mismatch,
    }
}

/// Outcome for a file whose local content could not be hashed.
///
/// A remote hash can never be confirmed equal, so it counts as a mismatch.
pub fn classify_unreadable(remote: &RemoteProbeResult) -> DiffOutcome {
    match remote {
        RemoteProbeResult::PermissionDenied => DiffOutcome::PermissionIssue,
        RemoteProbeResult::NotFound => DiffOutcome::Missing,
        RemoteProbeResult::Hash(_) => DiffOutcome::Mismatch,
    }
}

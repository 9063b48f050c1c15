//! Depth-first traversal of the local tree.
//!
//! Entries are visited in whatever order `read_dir` yields them. A
//! subdirectory is fully resolved before its siblings continue.
//!
//! Symlinks are followed without cycle detection: a link back to an
//! ancestor is walked again until the OS refuses the path (`ELOOP`), and
//! files under it are compared once per level.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use sshdiff_core::{
    DiffOutcome, FileRecord, RelativePath, RemoteChannel, RunTally, TraversalContext,
};

use crate::classify::{classify, classify_unreadable};
use crate::error::CompareError;
use crate::report::{Event, Reporter};
use crate::{hash, oracle, transfer};

/// Compare everything under `dir` and return the tally for that subtree.
///
/// A local directory that cannot be opened contributes nothing. Only a
/// broken remote channel is returned as an error.
pub fn walk(
    channel: &mut dyn RemoteChannel,
    ctx: &TraversalContext,
    dir: &RelativePath,
    reporter: &mut dyn Reporter,
) -> Result<RunTally, CompareError> {
    walk_dir(channel, ctx, dir, &ctx.local_path(dir), reporter)
}

/// `local_dir` is the on-disk path of `dir`; the two differ only when a
/// component was not valid UTF-8.
fn walk_dir(
    channel: &mut dyn RemoteChannel,
    ctx: &TraversalContext,
    dir: &RelativePath,
    local_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<RunTally, CompareError> {
    let entries = match fs::read_dir(local_dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("skipping unreadable directory {}: {err}", local_dir.display());
            return Ok(RunTally::default());
        }
    };

    let mut tally = RunTally::default();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("error reading {}: {err}", local_dir.display());
                continue;
            }
        };

        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if matches!(name, Cow::Owned(_)) {
            tracing::warn!(
                "non UTF-8 name in {}: {:?}, probing as {name:?}",
                local_dir.display(),
                file_name
            );
        }
        if name == "." || name == ".." {
            continue;
        }

        let relative = dir.join(&name);
        let local_path = entry.path();
        // Follows symlinks.
        let metadata = match fs::metadata(&local_path) {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::debug!("skipping {}: {err}", local_path.display());
                continue;
            }
        };

        if metadata.is_dir() {
            tally += walk_dir(channel, ctx, &relative, &local_path, reporter)?;
        } else if metadata.is_file() {
            let outcome = compare_file(channel, ctx, &relative, &local_path, reporter)?;
            tally.record(outcome);
        } else {
            tracing::debug!("skipping special file {}", local_path.display());
        }
    }

    Ok(tally)
}

/// Hash, probe, classify and act on one regular file.
///
/// A local file that cannot be read is still probed; it never matches.
fn compare_file(
    channel: &mut dyn RemoteChannel,
    ctx: &TraversalContext,
    relative: &RelativePath,
    local_path: &Path,
    reporter: &mut dyn Reporter,
) -> Result<DiffOutcome, CompareError> {
    let remote_path = ctx.remote_path(relative);

    let outcome = match hash::hash_file(local_path) {
        Ok(local_hash) => {
            let record = FileRecord::new(relative.clone(), local_hash);
            if ctx.verbose {
                reporter.report(Event::Checking {
                    path: remote_path.clone(),
                    hash: record.local_hash.clone(),
                });
            }
            let remote = oracle::probe(channel, &remote_path)?;
            classify(&record.local_hash, &remote)
        }
        Err(err) => {
            tracing::warn!("unreadable local file: {err}");
            let remote = oracle::probe(channel, &remote_path)?;
            classify_unreadable(&remote)
        }
    };
    if outcome == DiffOutcome::Match {
        return Ok(outcome);
    }

    reporter.report(Event::Outcome {
        path: remote_path.clone(),
        outcome,
    });

    if outcome == DiffOutcome::Mismatch {
        if let Some(destination) = ctx.mirror_path(relative) {
            match transfer::retrieve(channel, &remote_path, &destination) {
                Ok(_) => {
                    if ctx.verbose {
                        reporter.report(Event::Transferred {
                            source: remote_path,
                            destination,
                        });
                    }
                }
                Err(err) => {
                    tracing::warn!("transfer of {remote_path} failed: {err}");
                    reporter.report(Event::TransferFailed {
                        source: remote_path,
                        destination,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    Ok(outcome)
}

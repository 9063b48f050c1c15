//! Progress events and the end-of-run summary.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use sshdiff_core::{ContentHash, DiffOutcome, RunStatus, RunTally};

/// Something the user should see while the walk runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Verbose only: a file is about to be probed.
    Checking { path: String, hash: ContentHash },
    /// A classification. The walker never emits one for `Match`.
    Outcome { path: String, outcome: DiffOutcome },
    /// Verbose only: a divergent file was mirrored locally.
    Transferred { source: String, destination: PathBuf },
    /// Mirroring a divergent file failed; the run continues.
    TransferFailed {
        source: String,
        destination: PathBuf,
        reason: String,
    },
}

impl Event {
    /// The leading label of the console line, e.g. `"Missing"`.
    pub fn label(&self) -> &'static str {
        match self {
            Event::Checking { .. } => "Checking",
            Event::Outcome { outcome, .. } => match outcome {
                // Not emitted by the walker.
                DiffOutcome::Match => "Match",
                DiffOutcome::Mismatch => "Difference",
                DiffOutcome::Missing => "Missing",
                DiffOutcome::PermissionIssue => "Permission denied",
            },
            Event::Transferred { .. } => "Transferred",
            Event::TransferFailed { .. } => "Transfer failed",
        }
    }

    /// Everything after `"<label>: "`.
    pub fn detail(&self) -> String {
        match self {
            Event::Checking { path, hash } => format!("{path} [{hash}]"),
            Event::Outcome { path, .. } => path.clone(),
            Event::Transferred {
                source,
                destination,
            } => format!("{source} => {}", destination.display()),
            Event::TransferFailed {
                source,
                destination,
                reason,
            } => format!("{source} => {} ({reason})", destination.display()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.detail())
    }
}

/// Receives events in traversal order.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

impl Reporter for Vec<Event> {
    fn report(&mut self, event: Event) {
        self.push(event);
    }
}

/// Machine-readable end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub differences: usize,
    pub permission_issues: usize,
    pub status: RunStatus,
}

impl From<RunTally> for Summary {
    fn from(tally: RunTally) -> Self {
        Self {
            differences: tally.differences,
            permission_issues: tally.permission_issues,
            status: tally.status(),
        }
    }
}

/// `"All done - ..."` line for a finished run.
pub fn summary_text(tally: &RunTally) -> String {
    let mut text = if tally.differences > 0 {
        format!("All done - {} difference(s) found", tally.differences)
    } else {
        "All done - no differences".to_string()
    };
    if tally.permission_issues > 0 {
        text.push_str(&format!(
            ", unable to check {} file(s) due to permissions",
            tally.permission_issues
        ));
    }
    text
}

/// `=` rule as wide as the summary text, then the text itself.
pub fn summary_block(tally: &RunTally) -> String {
    let text = summary_text(tally);
    format!("{}\n{text}", "=".repeat(text.chars().count()))
}

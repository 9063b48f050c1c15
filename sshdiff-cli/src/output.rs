//! Console rendering of progress events and the final summary.

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};

use sshdiff_compare::{summary_block, Event, Reporter, Summary};
use sshdiff_core::{DiffOutcome, RunTally};

/// Prints each event as one line on stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: Event) {
        println!("{}: {}", styled_label(&event), event.detail());
    }
}

fn styled_label(event: &Event) -> ColoredString {
    let label = event.label();
    match event {
        Event::Checking { .. } | Event::Transferred { .. } => label.normal(),
        Event::Outcome { outcome, .. } => match outcome {
            // The walker does not report matches.
            DiffOutcome::Match => label.green(),
            DiffOutcome::Mismatch => label.red().bold(),
            DiffOutcome::Missing => label.yellow().bold(),
            DiffOutcome::PermissionIssue => label.magenta(),
        },
        Event::TransferFailed { .. } => label.red(),
    }
}

pub fn print_summary(tally: &RunTally, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&Summary::from(*tally))
                .context("failed to serialize summary JSON")?
        );
        return Ok(());
    }

    println!();
    println!("{}", summary_block(tally));
    Ok(())
}

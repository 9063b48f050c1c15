//! sshdiff — compare a local directory tree with its remote copy over SSH.
//!
//! # Usage
//!
//! ```text
//! sshdiff -s <server> --root-dir <dir> [-p <port>] [-u <user>] [-v]
//!         [--diff-dir <dir>] [--priv-key <file>] [--pub-key <file>]
//!         [--remote-root <dir>] [--timeout <ms>] [--json]
//! ```
//!
//! Exit status: 0 no differences, 2 differences found, 1 setup failure.

mod logging;
mod options;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sshdiff_compare::compare;
use sshdiff_core::{config, RunStatus};
use sshdiff_remote::{SessionError, SshChannel};

use options::Environment;
use output::ConsoleReporter;

const EXIT_SETUP_FAILURE: u8 = 1;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sshdiff",
    version,
    about = "Compare a local directory tree against its copy on a remote host over SSH",
    long_about = None,
)]
pub struct Cli {
    /// Target SSH server address/host, or a profile name from ~/.sshdiff/hosts.yaml.
    #[arg(short = 's', long = "server", value_name = "SERVER")]
    pub server: String,

    /// Source root directory.
    #[arg(long = "root-dir", value_name = "DIR")]
    pub root_dir: PathBuf,

    /// Alternative SSH port number [default: 22].
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// User for SSH login; defaults to the current shell user.
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub username: Option<String>,

    /// Increase verbosity.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Place copies of differing remote files into this directory.
    #[arg(long = "diff-dir", value_name = "DIR")]
    pub diff_dir: Option<PathBuf>,

    /// Private key file [default: ~/.ssh/id_rsa].
    #[arg(long = "priv-key", value_name = "FILE")]
    pub private_key: Option<PathBuf>,

    /// Public key file [default: <priv-key>.pub].
    #[arg(long = "pub-key", value_name = "FILE")]
    pub public_key: Option<PathBuf>,

    /// Remote directory mirrored by --root-dir [default: /].
    #[arg(long = "remote-root", value_name = "DIR")]
    pub remote_root: Option<String>,

    /// SSH timeout in milliseconds for connect and each remote call.
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Print the final summary as JSON.
    #[arg(long)]
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_SETUP_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);
    match run(cli) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<RunStatus> {
    let env = Environment::capture();
    let profiles = match env.home.as_deref() {
        Some(home) => config::load_at(home).context("failed to load host profiles")?,
        None => config::Config::default(),
    };

    let settings = options::resolve(&cli, &profiles, &env)?;
    options::preflight(&settings)?;
    tracing::info!(
        "comparing {} against {}:{}",
        settings.context.local_root.display(),
        settings.target.address(),
        settings.context.remote_root
    );

    let mut channel = SshChannel::connect(&settings.target).map_err(|err| match err {
        SessionError::Auth { .. } => anyhow::Error::new(err)
            .context("Unable to authenticate using given username/private key/public key"),
        other => anyhow::Error::new(other).context(format!(
            "Unable to connect to target server - {}",
            settings.target.address()
        )),
    })?;

    let mut reporter = ConsoleReporter::new();
    let tally = compare(&mut channel, &settings.context, &mut reporter)
        .context("comparison aborted")?;

    output::print_summary(&tally, settings.json)?;
    Ok(tally.status())
}

//! Merge command-line flags, host profiles and defaults; validate paths.
//!
//! Precedence per field: flag, then `hosts.yaml` profile, then built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use sshdiff_core::{config::Config, TraversalContext};
use sshdiff_remote::{SshTarget, DEFAULT_PORT};

use crate::Cli;

/// Process environment the defaults are derived from.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub home: Option<PathBuf>,
    pub user: Option<String>,
    pub passphrase: Option<String>,
}

impl Environment {
    pub fn capture() -> Self {
        Self {
            home: dirs::home_dir(),
            user: std::env::var("USER")
                .ok()
                .or_else(|| std::env::var("USERNAME").ok())
                .filter(|u| !u.is_empty()),
            passphrase: std::env::var("SSHDIFF_KEY_PASSPHRASE").ok(),
        }
    }
}

/// Everything a run needs, fully resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    pub target: SshTarget,
    pub context: TraversalContext,
    pub json: bool,
}

pub fn resolve(cli: &Cli, profiles: &Config, env: &Environment) -> Result<Settings> {
    let profile = profiles.profile(&cli.server).cloned().unwrap_or_default();

    let host = profile.address.unwrap_or_else(|| cli.server.clone());
    let port = cli.port.or(profile.port).unwrap_or(DEFAULT_PORT);
    let username = match cli.username.clone().or(profile.username).or(env.user.clone()) {
        Some(user) => user,
        None => bail!("cannot determine SSH username; pass -u <user>"),
    };

    let private_key = match cli.private_key.clone().or(profile.private_key) {
        Some(key) => key,
        None => match env.home.as_deref() {
            Some(home) => home.join(".ssh").join("id_rsa"),
            None => bail!("cannot determine home directory; pass --priv-key <file>"),
        },
    };
    let public_key = cli
        .public_key
        .clone()
        .or(profile.public_key)
        .unwrap_or_else(|| with_pub_suffix(&private_key));

    let remote_root = cli
        .remote_root
        .clone()
        .or(profile.remote_root)
        .unwrap_or_else(|| "/".to_string());

    let target = SshTarget {
        host,
        port,
        username,
        private_key,
        public_key: Some(public_key),
        passphrase: env.passphrase.clone(),
        timeout: cli.timeout.filter(|ms| *ms > 0).map(Duration::from_millis),
    };
    let context = TraversalContext::new(cli.root_dir.clone())
        .with_remote_root(remote_root)
        .with_mirror_dir(cli.diff_dir.clone())
        .with_verbose(cli.verbose);

    Ok(Settings {
        target,
        context,
        json: cli.json,
    })
}

/// Local checks that must pass before any connection is attempted.
///
/// Creates the diff directory (with parents) when it does not exist yet.
pub fn preflight(settings: &Settings) -> Result<()> {
    let root = &settings.context.local_root;
    if !root.is_dir() {
        bail!("Invalid root directory - {}", root.display());
    }

    let private_key = &settings.target.private_key;
    if !private_key.is_file() {
        bail!("Unable to locate private key file - {}", private_key.display());
    }
    if let Some(public_key) = settings.target.public_key.as_deref() {
        if !public_key.is_file() {
            bail!("Unable to locate public key file - {}", public_key.display());
        }
    }

    if let Some(diff_dir) = settings.context.diff_mirror_dir.as_deref() {
        if !diff_dir.is_dir() {
            std::fs::create_dir_all(diff_dir).with_context(|| {
                format!("Unable to create differences directory - {}", diff_dir.display())
            })?;
        }
    }

    Ok(())
}

fn with_pub_suffix(private_key: &Path) -> PathBuf {
    let mut name = private_key.as_os_str().to_owned();
    name.push(".pub");
    PathBuf::from(name)
}

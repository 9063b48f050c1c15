//! Diagnostics go to stderr through `tracing`; stdout carries the report.

use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG` wins; otherwise `warn`, or `info` with `-v`.
pub fn init(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

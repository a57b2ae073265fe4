//! Diagnostic logging on stderr. Stdout is reserved for the response body.

use crate::constants::ENV_LOG;
use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Map the `-v` count to a default filter directive.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `SNOWY_LOG` overrides the `-v` level.
pub fn init(verbose: u8) -> Result<()> {
    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

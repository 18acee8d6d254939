// src/logging.rs

//! Logging setup for `jobgraph` using `tracing` + `tracing-subscriber`.
//!
//! The `--log-level` flag wins when given. Otherwise `JOBGRAPH_LOG` is read
//! as an `EnvFilter` directive list, so both `debug` and
//! `info,jobgraph::routing=trace` work. The fallback is `info`.
//!
//! Logs are sent to STDERR so that stdout carries only the report
//! (which may be JSON piped into another tool).

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "JOBGRAPH_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(filter_for(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("cannot install log subscriber: {err}"))
}

/// Filter chosen from the CLI flag, then `JOBGRAPH_LOG`, then `info`.
pub fn filter_for(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(level) => EnvFilter::new(level.directive()),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

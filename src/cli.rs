// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `jobgraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobgraph",
    version,
    about = "Validate, order and lay out job dependency graphs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the job document (YAML, JSON or TOML).
    ///
    /// The format is picked from the file extension; anything unknown is
    /// read as YAML.
    #[arg(long, value_name = "PATH", default_value = "jobs.yaml")]
    pub config: String,

    /// Print the topologically ordered execution plan.
    ///
    /// Fails if the graph contains a cycle.
    #[arg(long)]
    pub plan: bool,

    /// Print node levels, positions and connector geometry.
    #[arg(long)]
    pub layout: bool,

    /// Emit the report as JSON on stdout instead of text.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, the `JOBGRAPH_LOG` filter or `info` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

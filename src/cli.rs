// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `crashdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crashdag",
    version,
    about = "Critical-path scheduling with time-cost tradeoff (crashing) analysis.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `Crashdag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Crashdag.toml")]
    pub config: String,

    /// Write the plan table to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,

    /// Report every enumerated crash subset instead of the min-cost frontier.
    #[arg(long)]
    pub all_plans: bool,

    /// Only compute and print the baseline schedule; skip crash analysis.
    #[arg(long)]
    pub baseline_only: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRASHDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print tasks and edges, but compute nothing.
    #[arg(long)]
    pub dry_run: bool,
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

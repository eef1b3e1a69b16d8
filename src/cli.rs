// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `eb`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eb",
    version,
    about = "Run a build task script and the tasks it declares.",
    long_about = None
)]
pub struct CliArgs {
    /// Name of the task to run (`<name>.sh` or `<name>.py` in the scripts dir).
    #[arg(value_name = "TASK")]
    pub task: String,

    /// Convert declared tasks to the Evergreen `generate.tasks` format
    /// instead of running them locally.
    #[arg(long)]
    pub convert: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Command-line arguments for `undodb`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "undodb",
    version,
    about = "Check for UndoDB and run one of its programs.",
    long_about = None,
    disable_help_flag = true
)]
pub struct UndoDbArgs {
    /// Logging level (error, warn, info, debug, trace).
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// `run <program> [args...]`; anything else, `--help` included, prints
    /// the UndoDB overview.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Command-line arguments for `eb-save-artifact`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eb-save-artifact",
    version,
    about = "Copy a build output into build/Artifacts.",
    long_about = None
)]
pub struct SaveArtifactArgs {
    /// File to publish, relative to the build root.
    #[arg(value_name = "PATH")]
    pub artifact: PathBuf,

    /// Fail instead of skipping when the file does not exist.
    #[arg(long)]
    pub require_exists: bool,

    /// Logging level (error, warn, info, debug, trace).
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
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

// src/errors.rs

//! Crate-wide error type.
//!
//! Every failure here is fatal for the invocation: nothing is retried, the
//! binaries print the message and exit non-zero.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EbError {
    #[error("Need to define the {0} env var.")]
    MissingEnvVar(String),

    #[error("Expansions file {0:?} not found.")]
    ExpansionsNotFound(PathBuf),

    #[error("Invalid expansions file {path:?}: {reason}")]
    InvalidExpansions { path: PathBuf, reason: String },

    #[error("Cannot find scripts dir {0:?}")]
    ScriptsDirNotFound(PathBuf),

    #[error("Invalid command name '{0}': must be a bare file name without path separators")]
    InvalidCommandName(String),

    #[error("Ambiguous command '{command}': need exactly one of {shell:?} xor {interpreted:?}, found both")]
    AmbiguousCommand {
        command: String,
        shell: PathBuf,
        interpreted: PathBuf,
    },

    #[error("Unknown command '{command}': need exactly one of {shell:?} xor {interpreted:?}, found neither")]
    CommandNotFound {
        command: String,
        shell: PathBuf,
        interpreted: PathBuf,
    },

    #[error("Command '{command}' failed with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Tasks must be a directory {0:?}")]
    TasksNotADirectory(PathBuf),

    #[error("Invalid Tasks yaml file names: {}", .0.join(","))]
    InvalidTaskFileNames(Vec<String>),

    #[error("Invalid task file {file}: {}", join_violations(.violations))]
    InvalidTaskFile {
        file: String,
        violations: Vec<SchemaViolation>,
    },

    #[error("Cannot parse task file {file}: {source}")]
    TaskFileParse {
        file: String,
        source: serde_yaml::Error,
    },

    #[error("{0}")]
    ToolNotInstalled(String),

    #[error("Artifact {0:?} does not exist")]
    ArtifactNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single problem found while validating a task file.
///
/// Validation collects every violation in a file before failing, so one run
/// reports all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The document is not a mapping of `SchemaVersion` / `Tasks`.
    NotAMapping { found: String },
    MissingSchemaVersion,
    InvalidSchemaVersion { found: String },
    MissingTasks,
    TasksNotAList { found: String },
    /// `index` is zero-based; `entry` is the offending entry as written.
    TaskMissingName { index: usize, entry: String },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::NotAMapping { found } => {
                write!(f, "expected a mapping with SchemaVersion and Tasks, got {found}")
            }
            SchemaViolation::MissingSchemaVersion => write!(f, "missing SchemaVersion"),
            SchemaViolation::InvalidSchemaVersion { found } => {
                write!(f, "invalid schema version {found}")
            }
            SchemaViolation::MissingTasks => write!(f, "missing Tasks list"),
            SchemaViolation::TasksNotAList { found } => {
                write!(f, "Tasks must be a list, got {found}")
            }
            SchemaViolation::TaskMissingName { index, entry } => {
                write!(f, "task #{index} missing Name: {entry}")
            }
        }
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, EbError>;

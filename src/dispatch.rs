// src/dispatch.rs

//! Command dispatcher: map a command name to exactly one script in the
//! scripts directory and run it.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Expansions;
use crate::env::{build_subprocess_env, Environment};
use crate::errors::{EbError, Result};
use crate::exec::{Invocation, ProcessRunner};
use crate::fs::FileSystem;
use crate::layout::BuildLayout;

pub const SHELL_SUFFIX: &str = "sh";
pub const INTERPRETED_SUFFIX: &str = "py";

/// Result of looking up `<name>.sh` and `<name>.py` side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLookup {
    ShellScript(PathBuf),
    InterpretedScript(PathBuf),
    Ambiguous { shell: PathBuf, interpreted: PathBuf },
    Missing { shell: PathBuf, interpreted: PathBuf },
}

impl CommandLookup {
    /// The script to run, or the matching lookup error.
    pub fn into_script(self, command: &str) -> Result<PathBuf> {
        match self {
            CommandLookup::ShellScript(path) | CommandLookup::InterpretedScript(path) => Ok(path),
            CommandLookup::Ambiguous { shell, interpreted } => Err(EbError::AmbiguousCommand {
                command: command.to_string(),
                shell,
                interpreted,
            }),
            CommandLookup::Missing { shell, interpreted } => Err(EbError::CommandNotFound {
                command: command.to_string(),
                shell,
                interpreted,
            }),
        }
    }
}

/// Look for the two candidate scripts of `command` in `scripts_dir`.
pub fn lookup_command(fs: &dyn FileSystem, scripts_dir: &Path, command: &str) -> CommandLookup {
    let shell = scripts_dir.join(format!("{command}.{SHELL_SUFFIX}"));
    let interpreted = scripts_dir.join(format!("{command}.{INTERPRETED_SUFFIX}"));

    match (fs.exists(&shell), fs.exists(&interpreted)) {
        (true, false) => CommandLookup::ShellScript(shell),
        (false, true) => CommandLookup::InterpretedScript(interpreted),
        (true, true) => CommandLookup::Ambiguous { shell, interpreted },
        (false, false) => CommandLookup::Missing { shell, interpreted },
    }
}

/// Resolve and run `command` synchronously.
///
/// The script runs with the build root as working directory and
/// `base_env` plus prefixed expansions as its whole environment. A non-zero
/// exit is returned as [`EbError::CommandFailed`].
pub async fn dispatch<R: ProcessRunner + ?Sized>(
    fs: &dyn FileSystem,
    runner: &mut R,
    layout: &BuildLayout,
    command: &str,
    base_env: &Environment,
    expansions: &Expansions,
) -> Result<()> {
    let scripts_dir = layout.scripts_dir();
    if !fs.is_dir(&scripts_dir) {
        return Err(EbError::ScriptsDirNotFound(scripts_dir));
    }
    validate_command_name(command)?;

    let script = lookup_command(fs, &scripts_dir, command).into_script(command)?;
    debug!(command, script = ?script, "resolved command script");

    let env = build_subprocess_env(base_env, expansions);
    let invocation = Invocation::new(&script, layout.root(), env);

    info!(task = %command, script = ?script, "dispatching command");
    let outcome = runner.run(invocation).await?;

    if !outcome.success() {
        return Err(EbError::CommandFailed {
            command: command.to_string(),
            code: outcome.code,
        });
    }

    info!(task = %command, "command finished");
    Ok(())
}

fn validate_command_name(command: &str) -> Result<()> {
    let bare = !command.is_empty()
        && command != "."
        && command != ".."
        && !command.contains(['/', '\\']);
    if bare {
        Ok(())
    } else {
        Err(EbError::InvalidCommandName(command.to_string()))
    }
}

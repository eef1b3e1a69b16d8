// src/debugger.rs

//! `undodb`: a thin wrapper around the externally installed UndoDB suite.
//!
//! It checks that the requested program is on `$PATH` and then runs it with
//! the current environment and working directory, forwarding its exit code.
//! Managing the UndoDB installation itself is out of scope.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::{info, warn};

use crate::env::Environment;
use crate::errors::{EbError, Result};
use crate::exec::{Invocation, ProcessRunner};

/// Programs shipped with the UndoDB suite.
pub const KNOWN_PROGRAMS: &[&str] = &["udb", "live-record", "undodb-server"];

pub const OVERVIEW: &str = "\
This is a simple wrapper atop of the UndoDB toolsuite. It does some quick checks to
ensure you have UndoDB installed and configured correctly and then just runs the
program with the args you indicate.

Example usage:

    undodb run udb ./mongod --version
";

const NOT_FOUND: &str = "

    Could not find `{program}` on your `$PATH`.

You must manually download and install the undodb package.

UndoDB is only supported on linux platforms. It will not work on macOS or Windows.

1. Download the undodb tarball provided for your team.
    The tarball has the private key-server parameters baked into it,
    so do not share it outside of the company.

2. Untar and install:

        tar xzf undodb-5.3.4.198.tgz
        cd undodb-5.3.4.198 && sudo make install

There is good README help in the undodb directory if you have questions.
There is also extensive documentation at https://docs.undo.io.
";

/// Installation guide shown when `program` is missing.
pub fn not_found_message(program: &str) -> String {
    NOT_FOUND.replace("{program}", program)
}

/// Host interaction needed by the wrapper.
pub trait System: Send {
    /// Full path of `program` if it can be found on the search path.
    fn which(&self, program: &str) -> Option<PathBuf>;

    /// Run `argv[0]` with `argv[1..]` and return its exit code.
    fn run(&mut self, argv: Vec<String>) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>>;
}

/// Real host: explicit cwd and environment, processes via a [`ProcessRunner`].
#[derive(Debug)]
pub struct HostSystem<R: ProcessRunner> {
    cwd: PathBuf,
    env: Environment,
    runner: R,
}

impl<R: ProcessRunner> HostSystem<R> {
    pub fn new(cwd: impl Into<PathBuf>, env: Environment, runner: R) -> Self {
        Self {
            cwd: cwd.into(),
            env,
            runner,
        }
    }
}

impl<R: ProcessRunner> System for HostSystem<R> {
    fn which(&self, program: &str) -> Option<PathBuf> {
        find_in_path(self.env.get("PATH").map(String::as_str), program)
    }

    fn run(&mut self, argv: Vec<String>) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        Box::pin(async move {
            let mut args = argv.into_iter();
            let Some(program) = args.next() else {
                return Ok(0);
            };
            let program = self.which(&program).unwrap_or_else(|| PathBuf::from(&program));
            let invocation =
                Invocation::new(program, &self.cwd, self.env.clone()).with_args(args);
            let outcome = self.runner.run(invocation).await?;
            Ok(outcome.exit_code())
        })
    }
}

/// Look `program` up in a `PATH`-style list of directories.
///
/// A program containing a path separator is checked as given.
pub fn find_in_path(search_paths: Option<&str>, program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let as_given = Path::new(program);
    if as_given.components().count() > 1 {
        return is_executable(as_given).then(|| as_given.to_path_buf());
    }

    std::env::split_paths(search_paths?)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// What the wrapper ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperOutcome {
    /// Usage was printed; nothing ran.
    ShowedHelp,
    /// The program ran and exited with this code.
    Ran(i32),
}

impl WrapperOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            WrapperOutcome::ShowedHelp => 0,
            WrapperOutcome::Ran(code) => *code,
        }
    }
}

/// The `undodb` sub-command.
pub struct UndoDb<S: System> {
    args: Vec<String>,
    system: S,
}

impl<S: System> UndoDb<S> {
    pub fn new(args: Vec<String>, system: S) -> Self {
        Self { args, system }
    }

    /// `run <program> [args...]` runs the program; anything else prints the
    /// overview.
    pub async fn execute(mut self) -> Result<WrapperOutcome> {
        let wants_run = self.args.len() > 1 && self.args[0] == "run";
        if !wants_run {
            println!("{OVERVIEW}");
            return Ok(WrapperOutcome::ShowedHelp);
        }

        let argv = self.args.split_off(1);
        let program = argv[0].clone();

        if self.system.which(&program).is_none() {
            return Err(EbError::ToolNotInstalled(not_found_message(&program)));
        }
        if !KNOWN_PROGRAMS.contains(&program.as_str()) {
            warn!(
                program = %program,
                known = ?KNOWN_PROGRAMS,
                "program is not part of the UndoDB suite; running it anyway"
            );
        }

        info!(?argv, "running undodb command");
        let code = self.system.run(argv).await?;
        Ok(WrapperOutcome::Ran(code))
    }
}

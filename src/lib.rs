// src/lib.rs

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod debugger;
pub mod dispatch;
pub mod engine;
pub mod env;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod layout;
pub mod logging;
pub mod taskgen;

use std::path::Path;

use tracing::info;

use crate::cli::{CliArgs, SaveArtifactArgs, UndoDbArgs};
use crate::config::load_expansions;
use crate::debugger::{HostSystem, UndoDb};
use crate::engine::{RunMode, RunSummary, Runtime};
use crate::env::{repo_root, trim_env, Environment};
use crate::errors::Result;
use crate::exec::RealProcessRunner;
use crate::fs::{FileSystem, RealFileSystem};
use crate::layout::BuildLayout;

/// High-level entry point used by `main.rs`.
///
/// `process_env` is the caller's full environment; it is trimmed to `EB_*`
/// and `PATH` before anything else sees it.
pub async fn run(args: CliArgs, process_env: Environment) -> Result<RunSummary> {
    run_with(&RealFileSystem, RealProcessRunner::new(), args, process_env).await
}

/// [`run`] with an explicit filesystem and process runner.
pub async fn run_with<R: exec::ProcessRunner>(
    fs: &dyn FileSystem,
    runner: R,
    args: CliArgs,
    process_env: Environment,
) -> Result<RunSummary> {
    let env = trim_env(process_env);
    let layout = BuildLayout::new(repo_root(&env)?);
    let expansions = load_expansions(fs, &layout)?;

    info!(
        keys = %expansions.keys().collect::<Vec<_>>().join(", "),
        "have expansions as env vars"
    );

    let mode = if args.convert {
        RunMode::Convert
    } else {
        RunMode::Local
    };

    let runtime = Runtime::new(fs, runner, layout, env, expansions, mode);
    runtime.run([args.task]).await
}

/// Entry point for the `undodb` binary. Returns the exit code to use.
pub async fn run_undodb(args: UndoDbArgs, cwd: &Path, process_env: Environment) -> Result<i32> {
    let system = HostSystem::new(cwd, process_env, RealProcessRunner::new());
    let outcome = UndoDb::new(args.args, system).execute().await?;
    Ok(outcome.exit_code())
}

/// Entry point for the `eb-save-artifact` binary.
pub fn run_save_artifact(args: SaveArtifactArgs, process_env: Environment) -> Result<()> {
    let env = trim_env(process_env);
    let layout = BuildLayout::new(repo_root(&env)?);
    artifacts::save_artifact(&RealFileSystem, &layout, &args.artifact, !args.require_exists)?;
    Ok(())
}

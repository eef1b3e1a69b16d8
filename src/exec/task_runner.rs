// src/exec/task_runner.rs

//! Runs a single child process to completion.

use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::backend::{Invocation, ProcessOutcome};

/// Spawn `invocation` with inherited stdio and wait for it.
///
/// The child's environment is cleared and replaced by `invocation.env`.
/// There is no timeout: a hung child blocks the caller.
pub async fn run_process(invocation: Invocation) -> Result<ProcessOutcome> {
    info!(
        program = ?invocation.program,
        args = ?invocation.args,
        cwd = ?invocation.cwd,
        "starting process"
    );
    debug!(env_keys = ?invocation.env.keys().collect::<Vec<_>>(), "process environment");

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .current_dir(&invocation.cwd)
        .env_clear()
        .envs(&invocation.env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process {:?}", invocation.program))?;

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process {:?}", invocation.program))?;

    let outcome = ProcessOutcome {
        code: status.code(),
    };

    info!(
        program = ?invocation.program,
        exit_code = ?outcome.code,
        success = outcome.success(),
        "process exited"
    );

    Ok(outcome)
}

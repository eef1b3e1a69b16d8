// src/engine/runtime.rs

use std::fmt;

use tracing::{debug, info};

use crate::config::Expansions;
use crate::dispatch::dispatch;
use crate::env::Environment;
use crate::errors::Result;
use crate::exec::ProcessRunner;
use crate::fs::FileSystem;
use crate::layout::BuildLayout;
use crate::taskgen;

use super::queue::TaskQueue;
use super::{RunMode, RunSummary};

/// Drives the dispatcher and the task generator for one `eb` invocation.
///
/// Tasks run strictly one after another; the first failure aborts the run.
pub struct Runtime<'a, R: ProcessRunner> {
    fs: &'a dyn FileSystem,
    runner: R,
    layout: BuildLayout,
    env: Environment,
    expansions: Expansions,
    mode: RunMode,
}

impl<R: ProcessRunner> fmt::Debug for Runtime<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("layout", &self.layout)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<'a, R: ProcessRunner> Runtime<'a, R> {
    pub fn new(
        fs: &'a dyn FileSystem,
        runner: R,
        layout: BuildLayout,
        env: Environment,
        expansions: Expansions,
        mode: RunMode,
    ) -> Self {
        Self {
            fs,
            runner,
            layout,
            env,
            expansions,
            mode,
        }
    }

    /// Run `requested` and, depending on the mode, whatever it declares.
    ///
    /// - `Convert`: dispatch the first requested task, write
    ///   `build/Tasks.json`, stop.
    /// - `Local`: after each dispatch, regenerate `build/Tasks.json` and
    ///   queue every newly declared task.
    pub async fn run<I, S>(mut self, requested: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = TaskQueue::new(requested);
        let mut summary = RunSummary::default();

        while let Some(task) = queue.next_task() {
            dispatch(
                self.fs,
                &mut self.runner,
                &self.layout,
                &task,
                &self.env,
                &self.expansions,
            )
            .await?;
            summary.dispatched.push(task.clone());

            let graph = taskgen::generate(self.fs, &self.layout)?;
            summary.generated = graph.task_names().map(str::to_string).collect();

            match self.mode {
                RunMode::Convert => {
                    info!(task = %task, "converted generated tasks; stopping");
                    break;
                }
                RunMode::Local => {
                    let added = queue.enqueue_generated(graph.task_names());
                    debug!(task = %task, ?added, pending = queue.len(), "queued generated tasks");
                }
            }
        }

        info!(dispatched = ?summary.dispatched, "eb run complete");
        Ok(summary)
    }
}

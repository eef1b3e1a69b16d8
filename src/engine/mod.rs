// src/engine/mod.rs

//! Orchestration of one `eb` invocation.
//!
//! The pure pending-task bookkeeping lives in [`queue`]; the async shell
//! that dispatches scripts and regenerates the task graph is [`runtime`].

/// Canonical task name type used throughout the engine.
pub type TaskName = String;

/// What to do with tasks declared by a dispatched script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Run declared tasks locally, one after another.
    #[default]
    Local,
    /// Only write them to `build/Tasks.json` for the CI runner.
    Convert,
}

/// What a run did, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tasks dispatched, in order.
    pub dispatched: Vec<TaskName>,
    /// Task names in the last generated task graph.
    pub generated: Vec<TaskName>,
}

pub mod queue;
pub mod runtime;

pub use queue::TaskQueue;
pub use runtime::Runtime;

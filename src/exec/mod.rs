// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ProcessRunner` trait and the production
//!   `RealProcessRunner`; tests replace it with a recording fake.
//! - [`task_runner`] spawns one child with `tokio::process::Command` and
//!   waits for it.
//!
//! Exactly one child runs at a time: callers await each run before starting
//! the next.

pub mod backend;
pub mod task_runner;

pub use backend::{Invocation, ProcessOutcome, ProcessRunner, RealProcessRunner};
pub use task_runner::run_process;

// src/engine/queue.rs

//! Pending-task queue for local runs.
//!
//! Pure state: no IO, no Tokio. Tasks are dispatched in FIFO order, and a
//! name is accepted at most once per run, so a task that re-declares itself
//! (or a cycle of tasks declaring each other) terminates.

use std::collections::{HashSet, VecDeque};

use super::TaskName;

#[derive(Debug, Default)]
pub struct TaskQueue {
    pending: VecDeque<TaskName>,
    seen: HashSet<TaskName>,
}

impl TaskQueue {
    /// Queue seeded with the tasks requested on the command line.
    pub fn new<I, S>(requested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskName>,
    {
        let mut queue = Self::default();
        for name in requested {
            queue.push(name.into());
        }
        queue
    }

    /// Next task to dispatch, if any.
    pub fn next_task(&mut self) -> Option<TaskName> {
        self.pending.pop_front()
    }

    /// Enqueue generated task names that have not been seen yet.
    ///
    /// Returns the names that were actually added, in order.
    pub fn enqueue_generated<'a, I>(&mut self, names: I) -> Vec<TaskName>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.push(name.to_string()).then(|| name.to_string()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    fn push(&mut self, name: TaskName) -> bool {
        if self.seen.insert(name.clone()) {
            self.pending.push_back(name);
            true
        } else {
            false
        }
    }
}

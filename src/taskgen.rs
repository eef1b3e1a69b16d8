// src/taskgen.rs

//! Task generation.
//!
//! Scripts declare follow-up tasks by writing YAML files into `build/Tasks`:
//!
//! ```yaml
//! # build/Tasks/1.yml
//! SchemaVersion: 2020-01-01
//! Tasks:
//! - Name: foo
//! ```
//!
//! All declared tasks, ordered by file name and then by position in the
//! file, are turned into an Evergreen `generate.tasks` document at
//! `build/Tasks.json`. Each generated task has one step that re-invokes
//! `eb` with the task name.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::load_task_file;
use crate::errors::{EbError, Result};
use crate::fs::FileSystem;
use crate::layout::BuildLayout;

static TASK_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+\.yml$").expect("task file name pattern is valid")
});

/// Top-level `generate.tasks` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskGraph {
    pub tasks: Vec<GeneratedTask>,
}

impl TaskGraph {
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedTask {
    pub name: String,
    pub commands: Vec<CommandStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandStep {
    pub command: String,
    pub params: ShellExecParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellExecParams {
    pub working_dir: String,
    pub shell: String,
    pub script: String,
}

impl GeneratedTask {
    /// A task whose single `shell.exec` step runs `./eb '<name>'` from `src`.
    pub fn for_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: vec![CommandStep {
                command: "shell.exec".to_string(),
                params: ShellExecParams {
                    working_dir: "src".to_string(),
                    shell: "bash".to_string(),
                    script: format!("./eb {}", shell_quote(name)),
                },
            }],
        }
    }
}

/// Single-quote `s` for a POSIX shell.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// True if `name` is an acceptable task file name.
pub fn is_task_file_name(name: &str) -> bool {
    TASK_FILE_NAME.is_match(name)
}

/// Collect the generated tasks from `build/Tasks`.
///
/// A missing directory means nothing was declared and yields an empty list.
pub fn collect_tasks(fs: &dyn FileSystem, layout: &BuildLayout) -> Result<Vec<GeneratedTask>> {
    let task_dir = layout.tasks_dir();
    if !fs.exists(&task_dir) {
        debug!(dir = ?task_dir, "no tasks directory; nothing generated");
        return Ok(Vec::new());
    }
    if !fs.is_dir(&task_dir) {
        return Err(EbError::TasksNotADirectory(task_dir));
    }

    let mut files = task_file_names(fs, &task_dir)?;
    files.sort();

    let mut tasks = Vec::new();
    for file in &files {
        let task_file = load_task_file(fs, &task_dir.join(file))?;
        debug!(file = %file, count = task_file.tasks.len(), "loaded task file");
        tasks.extend(
            task_file
                .tasks
                .iter()
                .map(|decl| GeneratedTask::for_name(&decl.name)),
        );
    }

    Ok(tasks)
}

/// Build the task graph and write it to `build/Tasks.json`.
///
/// The document is assembled completely before anything is written, so a
/// validation error leaves any previous output file untouched.
pub fn generate(fs: &dyn FileSystem, layout: &BuildLayout) -> Result<TaskGraph> {
    let graph = TaskGraph {
        tasks: collect_tasks(fs, layout)?,
    };

    let out_path = layout.task_graph_file();
    let bytes = serde_json::to_vec(&graph)?;
    fs.write(&out_path, &bytes)?;

    info!(
        path = ?out_path,
        tasks = ?graph.task_names().collect::<Vec<_>>(),
        "wrote task graph"
    );
    Ok(graph)
}

fn task_file_names(fs: &dyn FileSystem, task_dir: &Path) -> Result<Vec<String>> {
    let names: Vec<String> = fs
        .read_dir(task_dir)?
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    let mut not_matched: Vec<String> = names
        .iter()
        .filter(|n| !is_task_file_name(n))
        .cloned()
        .collect();
    if !not_matched.is_empty() {
        not_matched.sort();
        return Err(EbError::InvalidTaskFileNames(not_matched));
    }

    Ok(names)
}

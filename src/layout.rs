// src/layout.rs

//! Fixed locations under the build root.
//!
//! Every file `eb` reads or writes lives at a fixed path relative to the
//! repository root named by `EB_REPO_ROOT`.

use std::path::{Path, PathBuf};

/// Paths derived from a single build root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    root: PathBuf,
}

impl BuildLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `build/Expansions.yml`
    pub fn expansions_file(&self) -> PathBuf {
        self.build_dir().join("Expansions.yml")
    }

    /// `buildscripts/eb/eb/scripts`
    pub fn scripts_dir(&self) -> PathBuf {
        self.root
            .join("buildscripts")
            .join("eb")
            .join("eb")
            .join("scripts")
    }

    /// `build/Tasks`: task files written by scripts during a run.
    pub fn tasks_dir(&self) -> PathBuf {
        self.build_dir().join("Tasks")
    }

    /// `build/Tasks.json`: the generated task graph document.
    pub fn task_graph_file(&self) -> PathBuf {
        self.build_dir().join("Tasks.json")
    }

    /// `build/Artifacts`
    pub fn artifacts_dir(&self) -> PathBuf {
        self.build_dir().join("Artifacts")
    }

    fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }
}

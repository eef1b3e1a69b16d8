#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use eb::env::{Environment, REPO_ROOT_VAR};
use eb::fs::mock::MockFileSystem;
use eb::layout::BuildLayout;
use tempfile::TempDir;

/// YAML for a task file declaring `names` with the recognised schema version.
pub fn task_file_yaml(names: &[&str]) -> String {
    let mut out = String::from("SchemaVersion: 2020-01-01\nTasks:\n");
    for name in names {
        out.push_str(&format!("- Name: {name}\n"));
    }
    out
}

/// Environment with `EB_REPO_ROOT` pointing at `root` and a plain `PATH`.
pub fn eb_env(root: &Path) -> Environment {
    let mut env = Environment::new();
    env.insert(REPO_ROOT_VAR.to_string(), root.display().to_string());
    env.insert("PATH".to_string(), "/usr/bin:/bin".to_string());
    env
}

/// A build root laid out on the real filesystem inside a temp dir.
pub struct BuildRoot {
    pub dir: TempDir,
    pub layout: BuildLayout,
}

impl BuildRoot {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn env(&self) -> Environment {
        eb_env(self.path())
    }
}

/// Builder for a temporary build root.
pub struct BuildRootBuilder {
    expansions: Option<String>,
    scripts_dir: bool,
    scripts: Vec<(String, String)>,
    task_files: Vec<(String, String)>,
}

impl BuildRootBuilder {
    pub fn new() -> Self {
        Self {
            expansions: Some(String::new()),
            scripts_dir: true,
            scripts: Vec::new(),
            task_files: Vec::new(),
        }
    }

    pub fn with_expansions(mut self, yaml: &str) -> Self {
        self.expansions = Some(yaml.to_string());
        self
    }

    pub fn without_expansions(mut self) -> Self {
        self.expansions = None;
        self
    }

    pub fn without_scripts_dir(mut self) -> Self {
        self.scripts_dir = false;
        self
    }

    /// Add an executable script, e.g. `with_script("build.sh", "#!/bin/sh\n...")`.
    pub fn with_script(mut self, file_name: &str, contents: &str) -> Self {
        self.scripts.push((file_name.to_string(), contents.to_string()));
        self
    }

    pub fn with_task_file(mut self, file_name: &str, contents: &str) -> Self {
        self.task_files.push((file_name.to_string(), contents.to_string()));
        self
    }

    pub fn build(self) -> BuildRoot {
        let dir = TempDir::new().expect("create temp build root");
        let layout = BuildLayout::new(dir.path());

        fs::create_dir_all(dir.path().join("build")).unwrap();
        if let Some(yaml) = self.expansions {
            fs::write(layout.expansions_file(), yaml).unwrap();
        }

        if self.scripts_dir {
            fs::create_dir_all(layout.scripts_dir()).unwrap();
        }
        for (name, contents) in self.scripts {
            let path = layout.scripts_dir().join(name);
            write_executable(&path, &contents);
        }

        if !self.task_files.is_empty() {
            fs::create_dir_all(layout.tasks_dir()).unwrap();
        }
        for (name, contents) in self.task_files {
            fs::write(layout.tasks_dir().join(name), contents).unwrap();
        }

        BuildRoot { dir, layout }
    }
}

impl Default for BuildRootBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }
}

/// In-memory build root at `/repo` with an empty expansions file and an
/// empty scripts directory.
pub fn mock_build_root() -> (MockFileSystem, BuildLayout) {
    let layout = BuildLayout::new(PathBuf::from("/repo"));
    let fs = MockFileSystem::new();
    fs.add_file(layout.expansions_file(), "");
    fs.add_dir(layout.scripts_dir());
    (fs, layout)
}

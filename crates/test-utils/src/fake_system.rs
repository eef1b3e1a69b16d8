use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use eb::debugger::System;
use eb::errors::Result;

/// A fake host for the `undodb` wrapper:
/// - `which` answers from a fixed table of installed programs
/// - `run` records argv and returns a configured exit code.
#[derive(Clone, Default)]
pub struct FakeSystem {
    installed: HashMap<String, PathBuf>,
    exit_code: i32,
    runs: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed(mut self, program: &str) -> Self {
        self.installed
            .insert(program.to_string(), PathBuf::from("/usr/local/bin").join(program));
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Shared handle to the argv of every run.
    pub fn runs(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.runs)
    }
}

impl System for FakeSystem {
    fn which(&self, program: &str) -> Option<PathBuf> {
        self.installed.get(program).cloned()
    }

    fn run(&mut self, argv: Vec<String>) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        self.runs.lock().unwrap().push(argv);
        let code = self.exit_code;
        Box::pin(async move { Ok(code) })
    }
}

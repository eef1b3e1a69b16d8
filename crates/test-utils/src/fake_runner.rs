use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use eb::errors::Result;
use eb::exec::{Invocation, ProcessOutcome, ProcessRunner};

/// Callback run for every invocation, e.g. to simulate a script writing
/// task files.
pub type SideEffect = Box<dyn FnMut(&Invocation) + Send>;

/// A fake process runner that:
/// - records every invocation
/// - returns exit code 0 unless a different code was configured for the
///   program's file stem
/// - optionally runs a side effect per invocation.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    exit_codes: Arc<Mutex<HashMap<String, Option<i32>>>>,
    side_effect: Arc<Mutex<Option<SideEffect>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make programs whose file stem is `stem` exit with `code`
    /// (`None` = killed by a signal).
    pub fn with_exit_code(self, stem: &str, code: Option<i32>) -> Self {
        self.exit_codes.lock().unwrap().insert(stem.to_string(), code);
        self
    }

    pub fn with_side_effect(self, f: impl FnMut(&Invocation) + Send + 'static) -> Self {
        *self.side_effect.lock().unwrap() = Some(Box::new(f));
        self
    }

    /// Shared handle to the recorded invocations.
    pub fn invocations(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.invocations)
    }

    /// File stems of the programs run so far, in order.
    pub fn program_stems(&self) -> Vec<String> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(|inv| stem(&inv.program))
            .collect()
    }
}

fn stem(program: &Path) -> String {
    program
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl ProcessRunner for RecordingRunner {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + '_>> {
        let code = self
            .exit_codes
            .lock()
            .unwrap()
            .get(&stem(&invocation.program))
            .copied()
            .unwrap_or(Some(0));

        if let Some(effect) = self.side_effect.lock().unwrap().as_mut() {
            effect(&invocation);
        }
        self.invocations.lock().unwrap().push(invocation);

        let outcome = match code {
            Some(code) => ProcessOutcome::exited(code),
            None => ProcessOutcome { code: None },
        };
        Box::pin(async move { Ok(outcome) })
    }
}

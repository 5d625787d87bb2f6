use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use monobuild::build::{BuildExecutor, BuildRequest, CapturedOutput, ExecutionResult};
use monobuild::errors::BuildFailure;
use monobuild::types::BoxFuture;

/// A fake executor that:
/// - records which targets were "built", in order
/// - reports success, except for targets registered via `fail_with` /
///   `fail_to_spawn`.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<BuildRequest>>>,
    failing: HashSet<String>,
    unspawnable: HashSet<String>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `target`'s build exit with status 1.
    pub fn fail_with(mut self, target: &str) -> Self {
        self.failing.insert(target.to_string());
        self
    }

    /// Make `target`'s build fail to start.
    pub fn fail_to_spawn(mut self, target: &str) -> Self {
        self.unspawnable.insert(target.to_string());
        self
    }

    /// Shared handle to the recorded requests; stays valid after the
    /// executor is moved into an orchestrator.
    pub fn executed(&self) -> Arc<Mutex<Vec<BuildRequest>>> {
        Arc::clone(&self.executed)
    }

    /// Target paths built so far.
    pub fn built_targets(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.target.clone())
            .collect()
    }
}

impl BuildExecutor for FakeExecutor {
    fn run_build<'a>(
        &'a mut self,
        request: &'a BuildRequest,
    ) -> BoxFuture<'a, Result<ExecutionResult, BuildFailure>> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(request.clone());

            if self.unspawnable.contains(&request.target) {
                return Err(BuildFailure::Spawn {
                    command: request.command.display_line(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake: not found"),
                });
            }

            let success = !self.failing.contains(&request.target);
            Ok(ExecutionResult {
                output: CapturedOutput {
                    stdout: format!("built {}\n", request.target).into_bytes(),
                    stderr: if success {
                        Vec::new()
                    } else {
                        format!("fake failure for {}\n", request.target).into_bytes()
                    },
                },
                exit_code: Some(if success { 0 } else { 1 }),
                success,
            })
        })
    }
}

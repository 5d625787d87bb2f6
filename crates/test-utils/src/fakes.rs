use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use monobuild::errors::{MonobuildError, Result};
use monobuild::resolve::DependencyResolver;
use monobuild::types::{BoxFuture, CommitRange};
use monobuild::vcs::ChangeSource;

/// Dependency resolver with a fixed answer per target path.
///
/// Unknown targets resolve to no dependencies; targets registered with
/// `failing` return a collaborator error. Calls are counted.
#[derive(Clone, Default)]
pub struct FakeResolver {
    deps: HashMap<String, Vec<String>>,
    failing: HashMap<String, String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deps(mut self, target: &str, deps: &[&str]) -> Self {
        self.deps
            .insert(target.to_string(), deps.iter().map(|d| d.to_string()).collect());
        self
    }

    pub fn failing(mut self, target: &str, diagnostic: &str) -> Self {
        self.failing.insert(target.to_string(), diagnostic.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl DependencyResolver for FakeResolver {
    fn resolve_deps<'a>(&'a self, target_path: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(target_path.to_string());
            if let Some(diag) = self.failing.get(target_path) {
                return Err(MonobuildError::CollaboratorError {
                    tool: format!("go list -json ./{target_path}"),
                    output: diag.clone(),
                });
            }
            Ok(self.deps.get(target_path).cloned().unwrap_or_default())
        })
    }
}

/// Change source returning a fixed list, recording the ranges it was asked
/// about.
#[derive(Clone, Default)]
pub struct FakeChangeSource {
    files: Vec<String>,
    error: Option<String>,
    ranges: Arc<Mutex<Vec<CommitRange>>>,
}

impl FakeChangeSource {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing(diagnostic: &str) -> Self {
        Self {
            error: Some(diagnostic.to_string()),
            ..Self::default()
        }
    }

    pub fn ranges(&self) -> Vec<CommitRange> {
        self.ranges.lock().unwrap().clone()
    }
}

impl ChangeSource for FakeChangeSource {
    fn changed_files<'a>(&'a self, range: &'a CommitRange) -> BoxFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            self.ranges.lock().unwrap().push(range.clone());
            match &self.error {
                Some(diag) => Err(MonobuildError::CollaboratorError {
                    tool: "git diff".to_string(),
                    output: diag.clone(),
                }),
                None => Ok(self.files.clone()),
            }
        })
    }
}

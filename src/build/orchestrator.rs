// src/build/orchestrator.rs

//! Sequential, fail-fast build orchestration.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::build::executor::{BuildExecutor, BuildRequest};
use crate::build::state::{TargetRun, TargetState};
use crate::errors::{BuildFailure, MonobuildError, Result};
use crate::fs::FileSystem;
use crate::impact::ImpactReport;
use crate::resolve::ResolvedTarget;

/// Drives the build of every affected target, one at a time, in
/// configuration order.
///
/// Per-target progress is kept in [`TargetRun`]s; the first failure sets
/// the run-level `aborted` flag and no further target is attempted. Both
/// remain inspectable through [`runs`](Self::runs) and
/// [`is_aborted`](Self::is_aborted) after [`run`](Self::run) returns.
pub struct BuildOrchestrator<'a, E> {
    targets: &'a [ResolvedTarget],
    impact: &'a ImpactReport,
    fs: &'a dyn FileSystem,
    root: &'a Path,
    executor: E,
    runs: Vec<TargetRun>,
    aborted: bool,
}

impl<'a, E: BuildExecutor> BuildOrchestrator<'a, E> {
    /// `root` is the working directory used when a target's build command
    /// has no `dir`, and the base for relative `dir`s.
    pub fn new(
        targets: &'a [ResolvedTarget],
        impact: &'a ImpactReport,
        fs: &'a dyn FileSystem,
        root: &'a Path,
        executor: E,
    ) -> Self {
        let runs = targets
            .iter()
            .map(|t| TargetRun::new(t.path().clone()))
            .collect();
        Self {
            targets,
            impact,
            fs,
            root,
            executor,
            runs,
            aborted: false,
        }
    }

    pub fn runs(&self) -> &[TargetRun] {
        &self.runs
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Build every target that has change evidence.
    ///
    /// Returns [`MonobuildError::NoTargets`] without doing anything if no
    /// targets are configured. Targets without evidence are skipped, which
    /// is not an error.
    pub async fn run(&mut self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(MonobuildError::NoTargets);
        }

        let targets = self.targets;
        let mut failure: Option<MonobuildError> = None;

        for (idx, target) in targets.iter().enumerate() {
            if self.aborted {
                debug!(target = %target.path(), "not attempted: run aborted");
                continue;
            }

            if !self.impact.has_evidence(target.path()) {
                info!(target = %target.path(), "skipping build target: no changes");
                self.runs[idx].transition(TargetState::Skipped);
                continue;
            }

            if let Err(err) = self.build_target(idx, target).await {
                error!(target = %target.path(), error = %err, "build failed; aborting remaining targets");
                self.aborted = true;
                failure = Some(err);
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn build_target(&mut self, idx: usize, target: &ResolvedTarget) -> Result<()> {
        let spec = target.build_command();
        let working_dir = self.working_dir_for(target);

        if !self.fs.is_dir(&working_dir) {
            self.runs[idx].transition(TargetState::Failed);
            return Err(MonobuildError::ConfigError(format!(
                "build command error: directory '{}' for target '{}' does not exist",
                working_dir.display(),
                target.path()
            )));
        }

        let evidence: Vec<&str> = self
            .impact
            .evidence_for(target.path())
            .map(|f| f.path.as_str())
            .collect();
        info!(
            target = %target.path(),
            cmd = %spec.display_line(),
            dir = %working_dir.display(),
            ?evidence,
            "building target"
        );

        self.runs[idx].transition(TargetState::Building);
        let request = BuildRequest {
            target: target.path().clone(),
            command: spec.clone(),
            working_dir,
        };

        let result = match self.executor.run_build(&request).await {
            Ok(result) => result,
            Err(source) => {
                self.runs[idx].transition(TargetState::Failed);
                return Err(MonobuildError::BuildFailed {
                    target: target.path().clone(),
                    source,
                });
            }
        };

        let run = &mut self.runs[idx];
        run.exit_code = result.exit_code;
        run.output = Some(result.output);

        if result.success {
            run.transition(TargetState::Succeeded);
            info!(target = %target.path(), "target built");
            Ok(())
        } else {
            run.transition(TargetState::Failed);
            Err(MonobuildError::BuildFailed {
                target: target.path().clone(),
                source: BuildFailure::ExitStatus {
                    code: result.exit_code,
                },
            })
        }
    }

    fn working_dir_for(&self, target: &ResolvedTarget) -> PathBuf {
        match &target.build_command().dir {
            Some(dir) => self.root.join(dir),
            None => self.root.to_path_buf(),
        }
    }
}

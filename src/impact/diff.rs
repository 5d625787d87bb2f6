// src/impact/diff.rs

//! Diff engine: changed files → per-target change evidence.
//!
//! The scan is a fold over the reported paths producing an immutable
//! [`ImpactReport`]; targets are never mutated while files are scanned.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::TargetPath;
use crate::errors::{MonobuildError, Result};
use crate::fs::FileSystem;
use crate::impact::classify::classify;
use crate::resolve::ResolvedTarget;
use crate::types::CommitRange;
use crate::vcs::ChangeSource;

/// One file reported by the version-control diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedFile {
    pub path: String,
    /// Targets for which this file is a dependency trigger.
    pub dependency_of: Vec<TargetPath>,
    /// Targets for which this file is a watch trigger.
    pub watched_by: Vec<TargetPath>,
}

impl ChangedFile {
    pub fn is_relevant(&self) -> bool {
        !self.dependency_of.is_empty() || !self.watched_by.is_empty()
    }
}

/// Outcome of impact analysis.
///
/// Every changed file appears once in [`files`](Self::files); a file can be
/// evidence for several targets. Evidence order follows the order the
/// files were reported in.
#[derive(Debug, Clone, Default)]
pub struct ImpactReport {
    files: Vec<ChangedFile>,
    target_order: Vec<TargetPath>,
    /// target path -> indices into `files`
    evidence: HashMap<TargetPath, Vec<usize>>,
}

impl ImpactReport {
    fn for_targets(targets: &[ResolvedTarget]) -> Self {
        Self {
            files: Vec::new(),
            target_order: targets.iter().map(|t| t.path().clone()).collect(),
            evidence: HashMap::new(),
        }
    }

    fn with_file(mut self, file: ChangedFile) -> Self {
        let idx = self.files.len();
        for target in &self.target_order {
            if file.dependency_of.contains(target) || file.watched_by.contains(target) {
                self.evidence.entry(target.clone()).or_default().push(idx);
            }
        }
        self.files.push(file);
        self
    }

    /// All changed files, in reported order.
    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }

    /// Target paths in configuration order.
    pub fn targets(&self) -> &[TargetPath] {
        &self.target_order
    }

    /// Change evidence for `target`; empty means the target is skipped.
    pub fn evidence_for<'a>(&'a self, target: &str) -> impl Iterator<Item = &'a ChangedFile> + 'a {
        self.evidence
            .get(target)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.files[idx])
    }

    pub fn has_evidence(&self, target: &str) -> bool {
        self.evidence.get(target).is_some_and(|e| !e.is_empty())
    }

    /// Targets with evidence, in configuration order.
    pub fn affected_targets(&self) -> impl Iterator<Item = &TargetPath> {
        self.target_order.iter().filter(|t| self.has_evidence(t))
    }
}

/// Obtain the changed files from `source` and classify them against every
/// target.
pub async fn diff(
    range: &CommitRange,
    targets: &[ResolvedTarget],
    dep_source_dirs: &[String],
    source: &dyn ChangeSource,
    fs: &dyn FileSystem,
    root: &Path,
) -> Result<ImpactReport> {
    let paths = source.changed_files(range).await?;
    analyze(paths, targets, dep_source_dirs, fs, root)
}

/// Classify an already-obtained list of changed paths.
///
/// Fails with [`MonobuildError::MissingChangedFile`] if a reported path is
/// not present under `root`: the working tree is assumed to match the diff,
/// and deletions are not handled.
pub fn analyze(
    paths: Vec<String>,
    targets: &[ResolvedTarget],
    dep_source_dirs: &[String],
    fs: &dyn FileSystem,
    root: &Path,
) -> Result<ImpactReport> {
    let mut seen: HashSet<String> = HashSet::new();

    let report = paths
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .filter(|p| seen.insert(p.clone()))
        .try_fold(ImpactReport::for_targets(targets), |report, path| {
            if !fs.exists(&root.join(&path)) {
                return Err(MonobuildError::MissingChangedFile(path));
            }
            let file = classify_file(path, targets, dep_source_dirs);
            Ok(report.with_file(file))
        })?;

    info!(
        changed = report.files().len(),
        affected = report.affected_targets().count(),
        "impact analysis complete"
    );
    Ok(report)
}

fn classify_file(path: String, targets: &[ResolvedTarget], dep_source_dirs: &[String]) -> ChangedFile {
    let mut file = ChangedFile {
        path,
        dependency_of: Vec::new(),
        watched_by: Vec::new(),
    };
    for target in targets {
        let c = classify(&file.path, target, dep_source_dirs);
        if c.dependency {
            debug!(file = %file.path, target = %target.path(), "file is a dependency of target");
            file.dependency_of.push(target.path().clone());
        }
        if c.watch {
            debug!(file = %file.path, target = %target.path(), "file is watched by target");
            file.watched_by.push(target.path().clone());
        }
    }
    file
}

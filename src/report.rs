// src/report.rs

//! Rendering of the impact report and the build summary for the CLI.

use std::fmt::Write as _;

use serde::Serialize;

use crate::build::{TargetRun, TargetState};
use crate::config::TargetPath;
use crate::impact::{ChangedFile, ImpactReport};
use crate::types::CommitRange;

#[derive(Debug, Serialize)]
struct ImpactView<'a> {
    commit_range: String,
    files: &'a [ChangedFile],
    targets: Vec<TargetView<'a>>,
}

#[derive(Debug, Serialize)]
struct TargetView<'a> {
    path: &'a TargetPath,
    build: bool,
    evidence: Vec<&'a str>,
}

fn view<'a>(range: &CommitRange, report: &'a ImpactReport) -> ImpactView<'a> {
    ImpactView {
        commit_range: range.to_string(),
        files: report.files(),
        targets: report
            .targets()
            .iter()
            .map(|t| TargetView {
                path: t,
                build: report.has_evidence(t),
                evidence: report.evidence_for(t).map(|f| f.path.as_str()).collect(),
            })
            .collect(),
    }
}

/// Pretty-printed JSON form of the impact report.
pub fn impact_json(range: &CommitRange, report: &ImpactReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&view(range, report))
}

/// Human-readable impact report.
pub fn impact_text(range: &CommitRange, report: &ImpactReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "changes ({range}): {} file(s)", report.files().len());
    for file in report.files() {
        let _ = writeln!(out, "  {}", file.path);
        if !file.dependency_of.is_empty() {
            let _ = writeln!(out, "      dependency of: {}", file.dependency_of.join(", "));
        }
        if !file.watched_by.is_empty() {
            let _ = writeln!(out, "      watched by: {}", file.watched_by.join(", "));
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "targets ({}):", report.targets().len());
    for target in report.targets() {
        let n = report.evidence_for(target).count();
        if n == 0 {
            let _ = writeln!(out, "  - {target}: skip");
        } else {
            let _ = writeln!(out, "  - {target}: build ({n} change(s))");
        }
    }
    out
}

fn state_label(run: &TargetRun, aborted: bool) -> &'static str {
    match run.state {
        TargetState::Pending if aborted => "not attempted",
        TargetState::Pending => "pending",
        TargetState::Skipped => "skipped",
        TargetState::Building => "building",
        TargetState::Succeeded => "succeeded",
        TargetState::Failed => "failed",
    }
}

/// One line per target with its final state.
pub fn build_summary(runs: &[TargetRun], aborted: bool) -> String {
    let mut out = String::from("build summary:\n");
    for run in runs {
        let _ = write!(out, "  - {}: {}", run.target, state_label(run, aborted));
        if let (TargetState::Failed, Some(code)) = (run.state, run.exit_code) {
            let _ = write!(out, " (exit {code})");
        }
        out.push('\n');
    }
    out
}

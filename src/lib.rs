// src/lib.rs

pub mod build;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod impact;
pub mod logging;
pub mod report;
pub mod resolve;
pub mod types;
pub mod vcs;

use anyhow::{Context, Result};
use tracing::info;

use crate::build::{BuildOrchestrator, ProcessExecutor};
use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::fs::RealFileSystem;
use crate::resolve::{GoListResolver, resolve_all};
use crate::types::CommitRange;
use crate::vcs::GitChangeSource;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + validation
/// - target resolution (`go list`, watch globs)
/// - impact analysis (`git diff`)
/// - sequential, fail-fast builds (unless `--diff-only`)
///
/// Paths in the config and in the diff are relative to the current working
/// directory, which is expected to be the repository root.
pub async fn run(args: CliArgs) -> Result<()> {
    let root = std::env::current_dir().context("determining working directory")?;
    let fs = RealFileSystem;

    let cfg = load_and_validate(&fs, &root, &args.config)?;
    info!(config = %args.config, targets = cfg.targets().len(), "loaded config");

    let resolver = GoListResolver::new(&root);
    let targets = resolve_all(&cfg, &resolver, &fs, &root).await?;

    let range = CommitRange::from(args.commit_range.as_str());
    let source = GitChangeSource::new(&root);
    let impact = impact::diff(&range, &targets, cfg.dep_source_dirs(), &source, &fs, &root).await?;

    if args.json {
        println!("{}", report::impact_json(&range, &impact)?);
    } else {
        print!("{}", report::impact_text(&range, &impact));
    }

    if args.diff_only {
        info!("diff only; not building");
        return Ok(());
    }

    let mut orchestrator = BuildOrchestrator::new(&targets, &impact, &fs, &root, ProcessExecutor::new());
    let result = orchestrator.run().await;
    if !targets.is_empty() {
        print!("{}", report::build_summary(orchestrator.runs(), orchestrator.is_aborted()));
    }
    result?;
    Ok(())
}

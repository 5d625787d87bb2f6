// src/resolve/mod.rs

//! Target resolution.
//!
//! For each configured target this computes, once at startup:
//! - `resolved_deps`: the target's transitive import paths, via a
//!   [`DependencyResolver`];
//! - `resolved_watches`: the union of the files matched by its
//!   `watch_pattern` globs.
//!
//! Resolution is idempotent: on an unchanged tree, resolving twice yields
//! identical sets (both are ordered sets).

pub mod deps;
pub mod watches;

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{BuildCommand, ConfigFile, TargetConfig, TargetPath};
use crate::errors::{MonobuildError, Result};
use crate::fs::FileSystem;

pub use deps::{DependencyResolver, GoListResolver};

/// A target with its derived dependency and watch sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub config: TargetConfig,
    pub resolved_deps: BTreeSet<String>,
    pub resolved_watches: BTreeSet<String>,
}

impl ResolvedTarget {
    pub fn path(&self) -> &TargetPath {
        &self.config.path
    }

    pub fn build_command(&self) -> &BuildCommand {
        &self.config.build_command
    }
}

/// Resolve a single target.
///
/// Any dependency-resolution failure is fatal: a partial dependency set
/// would silently skip builds that are needed.
pub async fn resolve_target(
    target: &TargetConfig,
    resolver: &dyn DependencyResolver,
    fs: &dyn FileSystem,
    root: &Path,
) -> Result<ResolvedTarget> {
    let resolved_deps: BTreeSet<String> = resolver.resolve_deps(&target.path).await?.into_iter().collect();

    let mut resolved_watches = BTreeSet::new();
    for pattern in &target.watch_pattern {
        let matcher = watches::compile_pattern(pattern).map_err(|e| {
            MonobuildError::ConfigError(format!(
                "target '{}' has invalid watch pattern '{pattern}': {e}",
                target.path
            ))
        })?;
        let matched = watches::expand_pattern(fs, root, pattern, &matcher)?;
        debug!(target = %target.path, pattern = %pattern, matched = matched.len(), "expanded watch pattern");
        resolved_watches.extend(matched);
    }

    info!(
        target = %target.path,
        deps = resolved_deps.len(),
        watches = resolved_watches.len(),
        "resolved target"
    );

    Ok(ResolvedTarget {
        config: target.clone(),
        resolved_deps,
        resolved_watches,
    })
}

/// Resolve every configured target, sequentially and in configuration order.
pub async fn resolve_all(
    config: &ConfigFile,
    resolver: &dyn DependencyResolver,
    fs: &dyn FileSystem,
    root: &Path,
) -> Result<Vec<ResolvedTarget>> {
    let mut resolved = Vec::with_capacity(config.targets().len());
    for target in config.targets() {
        resolved.push(resolve_target(target, resolver, fs, root).await?);
    }
    Ok(resolved)
}

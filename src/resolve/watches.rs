// src/resolve/watches.rs

//! Watch-glob expansion.
//!
//! Patterns are expanded exactly once, at resolve time, into the concrete
//! repository-relative paths of existing files. Classification later only
//! compares literal paths against that set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use tracing::trace;

use crate::config::normalize_rel_path;
use crate::fs::FileSystem;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

/// Directories never descended into while expanding patterns.
const SKIPPED_DIRS: &[&str] = &[".git"];

/// Compile a single watch pattern.
///
/// `*` and `?` do not cross `/`; use `**` to match across directories.
pub fn compile_pattern(pattern: &str) -> std::result::Result<GlobMatcher, globset::Error> {
    let glob = GlobBuilder::new(&normalize_pattern(pattern))
        .literal_separator(true)
        .build()?;
    Ok(glob.compile_matcher())
}

/// Expand one pattern into the sorted set of matching file paths, relative
/// to `root` and `/`-separated.
///
/// Only the subtree below the pattern's literal directory prefix is walked,
/// so `cmd/server/**` never looks outside `cmd/server`.
pub fn expand_pattern(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &str,
    matcher: &GlobMatcher,
) -> Result<BTreeSet<String>> {
    let mut matches = BTreeSet::new();
    let base = root.join(literal_dir_prefix(&normalize_pattern(pattern)));
    if !fs.is_dir(&base) {
        trace!(pattern, base = %base.display(), "pattern base directory absent; no matches");
        return Ok(matches);
    }

    let mut stack: Vec<PathBuf> = vec![base];
    while let Some(dir) = stack.pop() {
        for path in fs
            .read_dir(&dir)
            .with_context(|| format!("expanding watch pattern {pattern}"))?
        {
            if fs.is_dir(&path) {
                // linked directories can loop back into the tree
                let skipped = fs.is_symlink(&path)
                    || path
                        .file_name()
                        .is_some_and(|n| SKIPPED_DIRS.iter().any(|s| n == *s));
                if !skipped {
                    stack.push(path);
                }
            } else if fs.is_file(&path) {
                if let Some(rel) = relative_str(root, &path) {
                    if matcher.is_match(&rel) {
                        matches.insert(rel);
                    }
                }
            }
        }
    }

    Ok(matches)
}

fn normalize_pattern(pattern: &str) -> String {
    normalize_rel_path(pattern)
}

/// Leading path components that contain no glob metacharacters, excluding
/// the final component (which may name a file).
fn literal_dir_prefix(pattern: &str) -> PathBuf {
    let components: Vec<&str> = pattern.split('/').collect();
    let mut prefix = PathBuf::new();
    for component in &components[..components.len().saturating_sub(1)] {
        if component.contains(GLOB_META) {
            break;
        }
        prefix.push(component);
    }
    prefix
}

/// `path` relative to `root`, with forward slashes.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}

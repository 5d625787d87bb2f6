// src/impact/classify.rs

//! Change classification: is one changed file relevant to one target?
//!
//! Two independent rules:
//!
//! - **watch trigger**: the file is literally one of the paths the target's
//!   watch globs expanded to at resolve time. Patterns are not evaluated
//!   here.
//! - **dependency trigger**: the target has resolved dependencies, the file
//!   path starts with one of the configured dependency roots, and the
//!   file's directory is a *substring* of one of the target's import
//!   paths. Import paths embed the local directory as a suffix
//!   (`example.com/repo/pkg/bar` for `pkg/bar/`), and substring matching
//!   tolerates that without parsing module paths. It over-matches packages
//!   that share a path fragment; that is accepted so that no real
//!   dependency change is ever missed.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::resolve::ResolvedTarget;

/// Result of classifying one file against one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub dependency: bool,
    pub watch: bool,
}

impl Classification {
    /// Whether the file counts as change evidence for the target.
    pub fn is_triggered(&self) -> bool {
        self.dependency || self.watch
    }
}

/// Classify `file` (repository-relative) against `target`.
pub fn classify(file: &str, target: &ResolvedTarget, dep_source_dirs: &[String]) -> Classification {
    Classification {
        dependency: is_dependency_trigger(file, &target.resolved_deps, dep_source_dirs),
        watch: is_watch_trigger(file, &target.resolved_watches),
    }
}

pub fn is_watch_trigger(file: &str, resolved_watches: &BTreeSet<String>) -> bool {
    resolved_watches.contains(file)
}

pub fn is_dependency_trigger(
    file: &str,
    resolved_deps: &BTreeSet<String>,
    dep_source_dirs: &[String],
) -> bool {
    if resolved_deps.is_empty() {
        return false;
    }
    // plain string prefix, not path-component prefix
    if !dep_source_dirs.iter().any(|dir| file.starts_with(dir.as_str())) {
        return false;
    }
    let dir = parent_dir(file);
    resolved_deps.iter().any(|dep| dep.contains(dir))
}

/// Directory part of a `/`-separated path; `"."` for top-level files.
pub fn parent_dir(path: &str) -> &str {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
        None => ".",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildCommand, TargetConfig};

    fn target(deps: &[&str], watches: &[&str]) -> ResolvedTarget {
        ResolvedTarget {
            config: TargetConfig {
                path: "cmd/server".to_string(),
                watch_pattern: vec![],
                build_command: BuildCommand {
                    dir: None,
                    command: "go".to_string(),
                    args: vec![],
                },
            },
            resolved_deps: deps.iter().map(|s| s.to_string()).collect(),
            resolved_watches: watches.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn dirs(d: &[&str]) -> Vec<String> {
        d.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dependency_trigger_when_package_is_imported() {
        let t = target(&["example.com/repo/pkg/bar"], &[]);
        let c = classify("pkg/bar/file.go", &t, &dirs(&["pkg"]));
        assert_eq!(c, Classification { dependency: true, watch: false });
    }

    #[test]
    fn no_dependency_trigger_for_unimported_package() {
        let t = target(&["example.com/repo/pkg/bar"], &[]);
        assert!(!classify("pkg/baz/file.go", &t, &dirs(&["pkg"])).is_triggered());
    }

    #[test]
    fn file_outside_dependency_roots_is_not_a_dependency() {
        let t = target(&["example.com/repo/internal/auth"], &[]);
        assert!(!classify("internal/auth/jwt.go", &t, &dirs(&["pkg"])).dependency);
    }

    #[test]
    fn empty_deps_never_dependency_trigger() {
        let t = target(&[], &[]);
        assert!(!classify("pkg/bar/file.go", &t, &dirs(&["pkg"])).dependency);
    }

    #[test]
    fn substring_match_over_includes_shared_fragments() {
        // `pkg/bar` is a substring of `.../pkg/barcode`
        let t = target(&["example.com/repo/pkg/barcode"], &[]);
        assert!(classify("pkg/bar/file.go", &t, &dirs(&["pkg"])).dependency);
    }

    #[test]
    fn watch_trigger_is_literal_membership() {
        let t = target(&[], &["cmd/server/main.go"]);
        assert!(classify("cmd/server/main.go", &t, &[]).watch);
        assert!(!classify("cmd/worker/main.go", &t, &[]).watch);
        // no pattern evaluation at classify time
        let globby = target(&[], &["cmd/server/*"]);
        assert!(!classify("cmd/server/main.go", &globby, &[]).watch);
    }

    #[test]
    fn both_triggers_are_recorded() {
        let t = target(&["example.com/repo/pkg/bar"], &["pkg/bar/file.go"]);
        let c = classify("pkg/bar/file.go", &t, &dirs(&["pkg"]));
        assert!(c.dependency && c.watch);
    }

    #[test]
    fn parent_dir_matches_path_semantics() {
        assert_eq!(parent_dir("pkg/bar/file.go"), "pkg/bar");
        assert_eq!(parent_dir("main.go"), ".");
        assert_eq!(parent_dir("/abs.go"), "/");
    }
}

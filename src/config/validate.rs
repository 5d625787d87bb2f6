// src/config/validate.rs

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile, TargetConfig};
use crate::errors::{MonobuildError, Result};
use crate::fs::FileSystem;

/// Validate a raw config against the project tree rooted at `root`.
///
/// Target paths are normalised (leading `./` and trailing `/` removed) so
/// they compare equal to the repository-relative paths reported by the VCS.
/// Dependency roots only lose a leading `./`: they are matched as plain
/// string prefixes, so a trailing `/` in `"pkg/"` keeps `pkgx/` out.
///
/// An empty target list is *not* rejected here; the orchestrator reports
/// it as its own error.
pub fn validate_config(raw: RawConfigFile, fs: &dyn FileSystem, root: &Path) -> Result<ConfigFile> {
    let dep_source_dirs: Vec<String> = raw
        .dep_source_dirs
        .iter()
        .map(|d| strip_leading_dot_slash(d))
        .collect();
    let targets: Vec<TargetConfig> = raw
        .targets
        .into_iter()
        .map(|mut t| {
            t.path = normalize_rel_path(&t.path);
            t
        })
        .collect();

    validate_dep_source_dirs(&dep_source_dirs, fs, root)?;
    validate_targets(&targets, fs, root)?;

    debug!(
        dep_source_dirs = dep_source_dirs.len(),
        targets = targets.len(),
        "config validated"
    );
    Ok(ConfigFile::new_unchecked(dep_source_dirs, targets))
}

fn validate_dep_source_dirs(dirs: &[String], fs: &dyn FileSystem, root: &Path) -> Result<()> {
    for dir in dirs {
        let path = root.join(normalize_rel_path(dir));
        if !fs.exists(&path) {
            return Err(MonobuildError::ConfigError(format!(
                "dep_source_dir '{dir}' does not exist"
            )));
        }
        if !fs.is_dir(&path) {
            return Err(MonobuildError::ConfigError(format!(
                "dep_source_dir '{dir}' is not a directory"
            )));
        }
    }
    Ok(())
}

fn validate_targets(targets: &[TargetConfig], fs: &dyn FileSystem, root: &Path) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for target in targets {
        if !seen.insert(target.path.as_str()) {
            return Err(MonobuildError::ConfigError(format!(
                "target.path '{}' has been used more than once",
                target.path
            )));
        }

        let path = root.join(&target.path);
        if !fs.exists(&path) {
            return Err(MonobuildError::ConfigError(format!(
                "target.path '{}' does not exist",
                target.path
            )));
        }
        if !fs.is_dir(&path) {
            return Err(MonobuildError::ConfigError(format!(
                "target.path '{}' is not a directory",
                target.path
            )));
        }

        if target.build_command.command.trim().is_empty() {
            return Err(MonobuildError::ConfigError(format!(
                "target '{}' has an empty build_command.command",
                target.path
            )));
        }
    }
    Ok(())
}

/// Strip leading `./` segments. A path that is nothing but `./` is kept
/// as written.
fn strip_leading_dot_slash(path: &str) -> String {
    let mut p = path.trim();
    while let Some(rest) = p.strip_prefix("./") {
        p = rest;
    }
    if p.is_empty() { path.trim().to_string() } else { p.to_string() }
}

/// Strip a leading `./` and trailing `/` from a repository-relative path.
pub fn normalize_rel_path(path: &str) -> String {
    let mut p = path.trim();
    while let Some(rest) = p.strip_prefix("./") {
        p = rest;
    }
    let p = p.trim_end_matches('/');
    if p.is_empty() { ".".to_string() } else { p.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::BuildCommand;
    use crate::fs::mock::MockFileSystem;

    fn target(path: &str) -> TargetConfig {
        TargetConfig {
            path: path.to_string(),
            watch_pattern: vec![],
            build_command: BuildCommand {
                dir: None,
                command: "go".to_string(),
                args: vec!["build".to_string()],
            },
        }
    }

    fn tree() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file("./pkg/bar/bar.go", "package bar");
        fs.add_file("./cmd/server/main.go", "package main");
        fs.add_file("./cmd/worker/main.go", "package main");
        fs.add_file("./README.md", "# readme");
        fs
    }

    #[test]
    fn accepts_valid_config_and_normalises_paths() {
        let fs = tree();
        let raw = RawConfigFile {
            dep_source_dirs: vec!["./pkg/".to_string()],
            targets: vec![target("./cmd/server"), target("cmd/worker/")],
        };
        let cfg = validate_config(raw, &fs, Path::new(".")).unwrap();
        assert_eq!(cfg.dep_source_dirs(), ["pkg/"]);
        let paths: Vec<&str> = cfg.targets().iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, vec!["cmd/server", "cmd/worker"]);
    }

    #[test]
    fn dependency_root_keeps_its_trailing_slash() {
        use crate::impact::classify::is_dependency_trigger;
        use std::collections::BTreeSet;

        let fs = tree();
        fs.add_file("./pkgx/bar/file.go", "package bar");
        let raw = RawConfigFile {
            dep_source_dirs: vec!["pkg/".to_string()],
            targets: vec![],
        };
        let cfg = validate_config(raw, &fs, Path::new(".")).unwrap();
        let deps: BTreeSet<String> =
            ["example.com/repo/pkgx/bar".to_string(), "example.com/repo/pkg/bar".to_string()].into();

        assert!(!is_dependency_trigger("pkgx/bar/file.go", &deps, cfg.dep_source_dirs()));
        assert!(is_dependency_trigger("pkg/bar/bar.go", &deps, cfg.dep_source_dirs()));
    }

    #[test]
    fn rejects_duplicate_target_paths() {
        let fs = tree();
        let raw = RawConfigFile {
            dep_source_dirs: vec![],
            targets: vec![target("cmd/server"), target("./cmd/server")],
        };
        let err = validate_config(raw, &fs, Path::new(".")).unwrap_err();
        match err {
            MonobuildError::ConfigError(msg) => assert!(msg.contains("more than once")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_and_non_directory_paths() {
        let fs = tree();
        let missing_dep = RawConfigFile {
            dep_source_dirs: vec!["vendor".to_string()],
            targets: vec![],
        };
        assert!(matches!(
            validate_config(missing_dep, &fs, Path::new(".")),
            Err(MonobuildError::ConfigError(msg)) if msg.contains("vendor")
        ));

        let file_target = RawConfigFile {
            dep_source_dirs: vec![],
            targets: vec![target("README.md")],
        };
        assert!(matches!(
            validate_config(file_target, &fs, Path::new(".")),
            Err(MonobuildError::ConfigError(msg)) if msg.contains("not a directory")
        ));
    }

    #[test]
    fn empty_target_list_is_valid() {
        let fs = tree();
        let cfg = validate_config(RawConfigFile::default(), &fs, Path::new(".")).unwrap();
        assert!(cfg.targets().is_empty());
    }

    #[test]
    fn normalize_handles_edge_cases() {
        assert_eq!(normalize_rel_path("././pkg//"), "pkg");
        assert_eq!(normalize_rel_path("./"), ".");
        assert_eq!(normalize_rel_path("cmd/server"), "cmd/server");
    }
}

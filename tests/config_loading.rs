// tests/config_loading.rs

use std::fs;
use std::path::{Path, PathBuf};

use monobuild::config::{load_and_validate, load_from_path};
use monobuild::errors::MonobuildError;
use monobuild::fs::RealFileSystem;

const CONFIG: &str = r#"
dep_source_dirs = ["./pkg/", "internal"]

[[target]]
path = "./cmd/server/"
watch_pattern = ["cmd/server/**", "deploy/server.yaml"]

[target.build_command]
dir = "cmd/server"
command = "go"
args = ["build", "-o", "bin/server", "."]

[[target]]
path = "cmd/worker"

[target.build_command]
command = "make"
"#;

fn repo_with(dirs: &[&str], config: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    for d in dirs {
        fs::create_dir_all(dir.path().join(d)).unwrap();
    }
    let config_path = dir.path().join("monobuild.toml");
    fs::write(&config_path, config).unwrap();
    (dir, config_path)
}

fn config_error(root: &Path, path: &Path) -> String {
    match load_and_validate(&RealFileSystem, root, path) {
        Err(MonobuildError::ConfigError(msg)) => msg,
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn loads_and_normalizes_a_valid_config() {
    let (dir, path) = repo_with(&["pkg", "internal", "cmd/server", "cmd/worker"], CONFIG);
    let cfg = load_and_validate(&RealFileSystem, dir.path(), &path).unwrap();

    assert_eq!(cfg.dep_source_dirs(), ["pkg/", "internal"]);
    let targets = cfg.targets();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].path, "cmd/server");
    assert_eq!(targets[0].watch_pattern, vec!["cmd/server/**", "deploy/server.yaml"]);
    assert_eq!(targets[0].build_command.dir, Some(PathBuf::from("cmd/server")));
    assert_eq!(targets[0].build_command.display_line(), "go build -o bin/server .");
    assert_eq!(targets[1].path, "cmd/worker");
    assert!(targets[1].watch_pattern.is_empty());
    assert_eq!(targets[1].build_command.dir, None);
    assert!(targets[1].build_command.args.is_empty());
}

#[test]
fn missing_dependency_directory_is_rejected() {
    let (dir, path) = repo_with(&["pkg", "cmd/server", "cmd/worker"], CONFIG);
    let msg = config_error(dir.path(), &path);
    assert!(msg.contains("internal"), "{msg}");
}

#[test]
fn missing_target_directory_is_rejected() {
    let (dir, path) = repo_with(&["pkg", "internal", "cmd/server"], CONFIG);
    let msg = config_error(dir.path(), &path);
    assert!(msg.contains("cmd/worker"), "{msg}");
}

#[test]
fn target_path_that_is_a_file_is_rejected() {
    let (dir, path) = repo_with(&["pkg", "internal", "cmd/server", "cmd"], CONFIG);
    fs::write(dir.path().join("cmd/worker"), "not a dir").unwrap();
    let msg = config_error(dir.path(), &path);
    assert!(msg.contains("not a directory"), "{msg}");
}

#[test]
fn duplicate_targets_are_rejected() {
    let config = r#"
[[target]]
path = "cmd/server"
[target.build_command]
command = "go"

[[target]]
path = "./cmd/server"
[target.build_command]
command = "go"
"#;
    let (dir, path) = repo_with(&["cmd/server"], config);
    let msg = config_error(dir.path(), &path);
    assert!(msg.contains("more than once"), "{msg}");
}

#[test]
fn unknown_keys_fail_to_parse() {
    let config = r#"
[[target]]
path = "cmd/server"
watch_patterns = ["typo"]
[target.build_command]
command = "go"
"#;
    let (dir, path) = repo_with(&["cmd/server"], config);
    let err = load_from_path(&RealFileSystem, &path).unwrap_err();
    assert!(matches!(err, MonobuildError::TomlError(_)));
    drop(dir);
}

#[test]
fn missing_config_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let msg = config_error(dir.path(), &dir.path().join("absent.toml"));
    assert!(msg.contains("absent.toml"), "{msg}");
}

#[test]
fn empty_config_is_accepted_without_targets() {
    let (dir, path) = repo_with(&[], "");
    let cfg = load_and_validate(&RealFileSystem, dir.path(), &path).unwrap();
    assert!(cfg.targets().is_empty());
    assert!(cfg.dep_source_dirs().is_empty());
}

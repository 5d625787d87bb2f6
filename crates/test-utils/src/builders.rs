use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use monobuild::config::{BuildCommand, ConfigFile, RawConfigFile, TargetConfig, validate_config};
use monobuild::fs::mock::MockFileSystem;
use monobuild::resolve::ResolvedTarget;

/// Builder for `ConfigFile` to simplify test setup.
///
/// Validation runs against a `MockFileSystem` that the builder populates
/// with every directory it is told about.
pub struct ConfigFileBuilder {
    raw: RawConfigFile,
    fs: MockFileSystem,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile::default(),
            fs: MockFileSystem::new(),
        }
    }

    pub fn with_dep_source_dir(mut self, dir: &str) -> Self {
        self.fs.add_dir(Path::new(".").join(dir));
        self.raw.dep_source_dirs.push(dir.to_string());
        self
    }

    pub fn with_target(mut self, target: TargetConfig) -> Self {
        self.fs.add_dir(Path::new(".").join(&target.path));
        self.raw.targets.push(target);
        self
    }

    pub fn build(self) -> ConfigFile {
        validate_config(self.raw, &self.fs, Path::new("."))
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TargetConfig`.
pub struct TargetConfigBuilder {
    target: TargetConfig,
}

impl TargetConfigBuilder {
    /// A target at `path` whose build command is `true` (always succeeds).
    pub fn new(path: &str) -> Self {
        Self {
            target: TargetConfig {
                path: path.to_string(),
                watch_pattern: vec![],
                build_command: BuildCommand {
                    dir: None,
                    command: "true".to_string(),
                    args: vec![],
                },
            },
        }
    }

    pub fn watch(mut self, pattern: &str) -> Self {
        self.target.watch_pattern.push(pattern.to_string());
        self
    }

    pub fn command(mut self, command: &str, args: &[&str]) -> Self {
        self.target.build_command.command = command.to_string();
        self.target.build_command.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target.build_command.dir = Some(dir.into());
        self
    }

    pub fn build(self) -> TargetConfig {
        self.target
    }
}

/// Builder for an already-resolved target, for classifier / diff /
/// orchestrator tests that skip the resolve phase.
pub struct ResolvedTargetBuilder {
    config: TargetConfig,
    deps: BTreeSet<String>,
    watches: BTreeSet<String>,
}

impl ResolvedTargetBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            config: TargetConfigBuilder::new(path).build(),
            deps: BTreeSet::new(),
            watches: BTreeSet::new(),
        }
    }

    pub fn from_config(config: TargetConfig) -> Self {
        Self {
            config,
            deps: BTreeSet::new(),
            watches: BTreeSet::new(),
        }
    }

    pub fn dep(mut self, import_path: &str) -> Self {
        self.deps.insert(import_path.to_string());
        self
    }

    pub fn watched(mut self, file: &str) -> Self {
        self.watches.insert(file.to_string());
        self
    }

    pub fn build(self) -> ResolvedTarget {
        ResolvedTarget {
            config: self.config,
            resolved_deps: self.deps,
            resolved_watches: self.watches,
        }
    }
}

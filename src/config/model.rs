// src/config/model.rs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Canonical target identity: the repository-relative directory of the
/// binary's entry point (e.g. `"cmd/server"`).
pub type TargetPath = String;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// dep_source_dirs = ["pkg", "internal"]
///
/// [[target]]
/// path = "cmd/server"
/// watch_pattern = ["cmd/server/**"]
///
/// [target.build_command]
/// dir = "."
/// command = "go"
/// args = ["build", "./cmd/server"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Directory prefixes whose files are shared library code.
    #[serde(default)]
    pub dep_source_dirs: Vec<String>,

    /// Build targets in the order they should be considered.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetConfig>,
}

/// `[[target]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub path: TargetPath,

    /// Glob patterns; any file they match rebuilds this target.
    #[serde(default)]
    pub watch_pattern: Vec<String>,

    pub build_command: BuildCommand,
}

/// `[target.build_command]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuildCommand {
    /// Working directory; `None` means the directory `mb` runs in.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl BuildCommand {
    /// Render as a single shell-like line, for logs and reports.
    pub fn display_line(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Validated configuration.
///
/// Only obtainable through [`crate::config::validate_config`], so holding
/// one means every dependency directory and target directory existed and
/// target paths are unique.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    dep_source_dirs: Vec<String>,
    targets: Vec<TargetConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(dep_source_dirs: Vec<String>, targets: Vec<TargetConfig>) -> Self {
        Self {
            dep_source_dirs,
            targets,
        }
    }

    pub fn dep_source_dirs(&self) -> &[String] {
        &self.dep_source_dirs
    }

    /// Targets in configuration order.
    pub fn targets(&self) -> &[TargetConfig] {
        &self.targets
    }
}

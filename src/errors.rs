// src/errors.rs

//! Crate-wide error types.
//!
//! Every fatal condition of a `mb` run maps onto one variant of
//! [`MonobuildError`]. There is no retry anywhere: the first error aborts
//! the run and is printed by `main`.

use thiserror::Error;

use crate::config::model::TargetPath;

#[derive(Error, Debug)]
pub enum MonobuildError {
    /// Missing/duplicate target paths, missing dependency directories,
    /// bad build-command directories, malformed glob patterns.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An external tool (`git`, `go list`) failed; `output` is its raw
    /// diagnostic text.
    #[error("{tool} failed: {output}")]
    CollaboratorError { tool: String, output: String },

    /// The diff reported a file that is not present in the working tree.
    #[error("changed file '{0}' reported by the diff does not exist on disk")]
    MissingChangedFile(String),

    #[error("no monobuild targets configured")]
    NoTargets,

    #[error("build of target '{target}' failed: {source}")]
    BuildFailed {
        target: TargetPath,
        #[source]
        source: BuildFailure,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a single target build did not succeed.
#[derive(Error, Debug)]
pub enum BuildFailure {
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running build: {0}")]
    Io(#[from] std::io::Error),

    /// `None` when the process was terminated by a signal.
    #[error("build command exited with {}", exit_code_display(.code))]
    ExitStatus { code: Option<i32> },
}

fn exit_code_display(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MonobuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_failure_names_target_and_cause() {
        let err = MonobuildError::BuildFailed {
            target: "cmd/server".to_string(),
            source: BuildFailure::ExitStatus { code: Some(2) },
        };
        let msg = err.to_string();
        assert!(msg.contains("cmd/server"));
        assert!(msg.contains("status 2"));
    }

    #[test]
    fn signal_termination_is_reported() {
        let failure = BuildFailure::ExitStatus { code: None };
        assert!(failure.to_string().contains("signal"));
    }
}

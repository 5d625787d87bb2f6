// src/vcs/mod.rs

//! Version-control diff collaborator.
//!
//! A [`ChangeSource`] turns a [`CommitRange`] into the list of changed
//! file paths, relative to the repository root.

pub mod git;

use crate::errors::Result;
use crate::types::{BoxFuture, CommitRange};

pub use git::GitChangeSource;

/// Trait abstracting where the list of changed files comes from.
///
/// Production code uses [`GitChangeSource`]; tests provide a fixed list.
pub trait ChangeSource: Send + Sync {
    fn changed_files<'a>(&'a self, range: &'a CommitRange) -> BoxFuture<'a, Result<Vec<String>>>;
}

/// Split one-path-per-line tool output into paths, dropping blank lines.
pub fn parse_name_only(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_discarded() {
        let out = "pkg/bar/file.go\n\ncmd/server/main.go\r\n\n";
        assert_eq!(
            parse_name_only(out),
            vec!["pkg/bar/file.go", "cmd/server/main.go"]
        );
    }

    #[test]
    fn empty_output_means_no_changes() {
        assert!(parse_name_only("").is_empty());
    }
}

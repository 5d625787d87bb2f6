// src/vcs/git.rs

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{MonobuildError, Result};
use crate::types::{BoxFuture, CommitRange};
use crate::vcs::{ChangeSource, parse_name_only};

/// `git diff --name-only [range]`, run in the repository root.
#[derive(Debug, Clone)]
pub struct GitChangeSource {
    root: PathBuf,
}

impl GitChangeSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

/// Arguments passed to `git` for a given range.
///
/// `core.quotePath=false` keeps non-ASCII paths verbatim instead of
/// C-quoted, so they compare equal to paths on disk.
fn git_diff_args(range: &CommitRange) -> Vec<String> {
    let mut args: Vec<String> = ["-c", "core.quotePath=false", "diff", "--name-only"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    if let CommitRange::Range(r) = range {
        args.push(r.clone());
    }
    args
}

impl ChangeSource for GitChangeSource {
    fn changed_files<'a>(&'a self, range: &'a CommitRange) -> BoxFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            let args = git_diff_args(range);
            debug!(?args, root = %self.root.display(), "running git diff");

            let output = Command::new("git")
                .args(&args)
                .current_dir(&self.root)
                .stdin(Stdio::null())
                .output()
                .await
                .map_err(|e| MonobuildError::CollaboratorError {
                    tool: "git diff".to_string(),
                    output: e.to_string(),
                })?;

            if !output.status.success() {
                let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stdout));
                return Err(MonobuildError::CollaboratorError {
                    tool: "git diff".to_string(),
                    output: text.trim().to_string(),
                });
            }

            let files = parse_name_only(&String::from_utf8_lossy(&output.stdout));
            info!(%range, changed = files.len(), "collected changed files");
            Ok(files)
        })
    }
}

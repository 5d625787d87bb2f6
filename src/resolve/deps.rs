// src/resolve/deps.rs

//! Dependency-resolution collaborator.
//!
//! Given a target directory, a [`DependencyResolver`] returns the
//! fully-qualified import paths the target's source transitively depends
//! on. Standard-library and third-party entries are returned as well; they
//! never match a local dependency root, so they are harmless.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{MonobuildError, Result};
use crate::types::BoxFuture;

/// Trait abstracting how a target's transitive imports are discovered.
///
/// Production code uses [`GoListResolver`]; tests provide a fake with a
/// fixed answer per target.
pub trait DependencyResolver: Send + Sync {
    fn resolve_deps<'a>(&'a self, target_path: &'a str) -> BoxFuture<'a, Result<Vec<String>>>;
}

/// Resolves dependencies with `go list -json ./<target>`.
#[derive(Debug, Clone)]
pub struct GoListResolver {
    root: PathBuf,
}

impl GoListResolver {
    /// `root` is the directory `go list` runs in (the module root).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DependencyResolver for GoListResolver {
    fn resolve_deps<'a>(&'a self, target_path: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            let pkg = go_package_arg(target_path);
            let tool = format!("go list -json {pkg}");
            debug!(target = %target_path, cmd = %tool, "resolving dependencies");

            let output = Command::new("go")
                .args(["list", "-json", &pkg])
                .current_dir(&self.root)
                .stdin(Stdio::null())
                .output()
                .await
                .map_err(|e| MonobuildError::CollaboratorError {
                    tool: tool.clone(),
                    output: e.to_string(),
                })?;

            if !output.status.success() {
                let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stdout));
                return Err(MonobuildError::CollaboratorError {
                    tool,
                    output: text.trim().to_string(),
                });
            }

            parse_go_list(&output.stdout).map_err(|e| MonobuildError::CollaboratorError {
                tool,
                output: format!("unreadable JSON output: {e}"),
            })
        })
    }
}

/// `go list` treats bare paths as import paths; local directories need `./`.
fn go_package_arg(target_path: &str) -> String {
    if target_path.starts_with("./") || target_path.starts_with('/') {
        target_path.to_string()
    } else {
        format!("./{target_path}")
    }
}

#[derive(Debug, Deserialize)]
struct GoPackage {
    #[serde(rename = "Deps", default)]
    deps: Vec<String>,
}

/// Parse the (possibly concatenated) JSON objects printed by `go list -json`
/// and return the union of their `Deps`, in first-seen order.
fn parse_go_list(stdout: &[u8]) -> serde_json::Result<Vec<String>> {
    let mut deps: Vec<String> = Vec::new();
    for pkg in serde_json::Deserializer::from_slice(stdout).into_iter::<GoPackage>() {
        for dep in pkg?.deps {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
    }
    Ok(deps)
}

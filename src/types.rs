use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed, sendable future returned by the collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Revision specifier handed to the version-control collaborator.
///
/// - `WorkingTree`: diff uncommitted changes (an empty `--commit-range`).
/// - `Range`: diff between the two ends of e.g. `"main...HEAD"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommitRange {
    #[default]
    WorkingTree,
    Range(String),
}

impl From<&str> for CommitRange {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            CommitRange::WorkingTree
        } else {
            CommitRange::Range(s.to_string())
        }
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitRange::WorkingTree => write!(f, "<working tree>"),
            CommitRange::Range(r) => write!(f, "{r}"),
        }
    }
}

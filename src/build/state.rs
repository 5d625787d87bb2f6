// src/build/state.rs

//! Per-target build state machine.
//!
//! ```text
//! Pending ──► Skipped
//!    │
//!    └──────► Building ──► Succeeded
//!                  └─────► Failed
//! ```
//!
//! `Failed` also aborts the whole orchestration run; targets after it stay
//! `Pending` and are reported as not attempted.

use std::borrow::Cow;

use serde::{Serialize, Serializer};

use crate::config::TargetPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetState {
    Pending,
    Skipped,
    Building,
    Succeeded,
    Failed,
}

impl TargetState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TargetState::Skipped | TargetState::Succeeded | TargetState::Failed
        )
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: TargetState) -> bool {
        matches!(
            (self, next),
            (TargetState::Pending, TargetState::Skipped)
                | (TargetState::Pending, TargetState::Building)
                | (TargetState::Pending, TargetState::Failed)
                | (TargetState::Building, TargetState::Succeeded)
                | (TargetState::Building, TargetState::Failed)
        )
    }
}

/// Output captured from a target's most recent build invocation, byte for
/// byte. Serialized lossily as UTF-8 text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedOutput {
    #[serde(serialize_with = "serialize_lossy")]
    pub stdout: Vec<u8>,
    #[serde(serialize_with = "serialize_lossy")]
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

/// State of one target within an orchestration run.
#[derive(Debug, Clone, Serialize)]
pub struct TargetRun {
    pub target: TargetPath,
    pub state: TargetState,
    /// `None` until a build process has actually run.
    pub output: Option<CapturedOutput>,
    pub exit_code: Option<i32>,
}

impl TargetRun {
    pub fn new(target: TargetPath) -> Self {
        Self {
            target,
            state: TargetState::Pending,
            output: None,
            exit_code: None,
        }
    }

    /// Move to `next`. Illegal transitions are a programming error and are
    /// ignored in release builds.
    pub(crate) fn transition(&mut self, next: TargetState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {:?} for target {}",
            self.state,
            next,
            self.target
        );
        if self.state.can_transition_to(next) {
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_paths_through_the_machine() {
        assert!(TargetState::Pending.can_transition_to(TargetState::Skipped));
        assert!(TargetState::Pending.can_transition_to(TargetState::Building));
        assert!(TargetState::Building.can_transition_to(TargetState::Succeeded));
        assert!(TargetState::Building.can_transition_to(TargetState::Failed));
    }

    #[test]
    fn terminal_states_do_not_move() {
        for terminal in [TargetState::Skipped, TargetState::Succeeded, TargetState::Failed] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(TargetState::Building));
            assert!(!terminal.can_transition_to(TargetState::Pending));
        }
        assert!(!TargetState::Skipped.can_transition_to(TargetState::Succeeded));
    }

    #[test]
    fn run_follows_build_path() {
        let mut run = TargetRun::new("cmd/server".to_string());
        run.transition(TargetState::Building);
        run.transition(TargetState::Succeeded);
        assert_eq!(run.state, TargetState::Succeeded);
    }

    #[test]
    fn captured_output_keeps_invalid_utf8() {
        let output = CapturedOutput {
            stdout: b"ok\xff\n".to_vec(),
            stderr: vec![],
        };
        assert_eq!(output.stdout, b"ok\xff\n");
        assert_eq!(output.stdout_lossy(), "ok\u{fffd}\n");
    }
}

// src/build/mod.rs

//! Build orchestration.
//!
//! - [`state`] holds the per-target state machine and captured output.
//! - [`executor`] provides the `BuildExecutor` trait and the real
//!   `ProcessExecutor`.
//! - [`orchestrator`] walks the targets in order, skipping those without
//!   change evidence and stopping at the first failure.

pub mod executor;
pub mod orchestrator;
pub mod state;

pub use executor::{BuildExecutor, BuildRequest, ExecutionResult, ProcessExecutor};
pub use orchestrator::BuildOrchestrator;
pub use state::{CapturedOutput, TargetRun, TargetState};

// src/impact/mod.rs

//! Impact analysis.
//!
//! - [`classify`] decides whether one changed file triggers one target.
//! - [`diff`] obtains the changed-file list and folds it into an
//!   [`ImpactReport`] mapping each target to its change evidence.

pub mod classify;
pub mod diff;

pub use classify::{Classification, classify as classify_file};
pub use diff::{ChangedFile, ImpactReport, analyze, diff};

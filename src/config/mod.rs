// src/config/mod.rs

//! Configuration loading and validation for monobuild.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it against the project tree (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{BuildCommand, ConfigFile, RawConfigFile, TargetConfig, TargetPath};
pub use validate::{normalize_rel_path, validate_config};

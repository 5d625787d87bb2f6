// src/config/loader.rs

use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::config::validate::validate_config;
use crate::errors::{MonobuildError, Result};
use crate::fs::FileSystem;

/// Load a configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** check the
/// filesystem. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path).map_err(|e| {
        MonobuildError::ConfigError(format!("cannot read config file {}: {e:#}", path.display()))
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file and validate it against the project tree at
/// `root`.
///
/// This is the entry point the rest of the application uses; it fails
/// eagerly, before any resolution, diffing or building happens.
pub fn load_and_validate(
    fs: &dyn FileSystem,
    root: &Path,
    path: impl AsRef<Path>,
) -> Result<ConfigFile> {
    let raw = load_from_path(fs, path)?;
    validate_config(raw, fs, root)
}


// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{EelyError, Result};

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// Text that is not YAML at all is a `YamlError`. YAML whose values have the
/// wrong shape (`chapters: 5`, a list as `title`) is a `ConfigError` naming
/// the offending key. Required keys are checked by [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    let document: serde_yaml::Value = serde_yaml::from_str(&contents)?;
    if document.is_null() {
        return Ok(RawConfigFile::default());
    }

    let config: RawConfigFile = serde_yaml::from_str(&contents)
        .map_err(|err| EelyError::ConfigError(format!("malformed config: {err}")))?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads YAML, keeping chapter and lecture declaration order.
/// - Checks that `title` and `chapters` are present and well formed.
///
/// Whether sources actually exist on disk is checked later, while the file
/// tree is built.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Directory that relative paths in the config are anchored to.
///
/// The config path is made absolute first so that symlinks created from it
/// keep resolving no matter where they are read from.
pub fn config_dir(config_path: &Path) -> Result<PathBuf> {
    let absolute = fs::canonicalize(config_path)
        .with_context(|| format!("resolving config path {}", config_path.display()))?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/")))
}

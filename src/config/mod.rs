// src/config/mod.rs

//! Configuration loading and validation for eely.
//!
//! Responsibilities:
//! - Define the YAML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate required keys (`validate.rs`).
//! - Apply command-line overrides (`overrides.rs`).
//! - Resolve defaulted paths once (`paths.rs`).

pub mod loader;
pub mod model;
pub mod overrides;
pub mod paths;
pub mod validate;

pub use loader::{config_dir, load_and_validate, load_from_path};
pub use model::{ChapterConfig, ConfigFile, RawChapterConfig, RawConfigFile, underscored};
pub use overrides::ConfigOverrides;
pub use paths::ResolvedPaths;
pub use validate::validate_config;

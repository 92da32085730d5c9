// src/config/paths.rs

//! Default resolution for every path the configuration may leave out.
//!
//! Relative paths are anchored at the config file's directory, except the
//! deck and archive names which live in the output directory. Each default
//! is computed once, in [`ResolvedPaths::resolve`].

use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, underscored};

/// Renderer looked up on `PATH` when `marp-cli` is not configured.
pub const DEFAULT_RENDERER: &str = "marp";

/// Suffix appended to the course archive's stem for the labs archive.
pub const LABS_SUFFIX: &str = "-labs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub config_dir: PathBuf,
    pub root_dir: PathBuf,
    pub output_dir: PathBuf,
    pub course_slides: PathBuf,
    pub course_archive: PathBuf,
    pub labs_archive: PathBuf,
    pub watermark: Option<PathBuf>,
    pub renderer: PathBuf,
    pub shared_assets: Option<PathBuf>,
}

impl ResolvedPaths {
    pub fn resolve(cfg: &ConfigFile, config_dir: &Path) -> Self {
        let root_dir = match &cfg.root {
            Some(root) => anchor(config_dir, root),
            None => config_dir.to_path_buf(),
        };

        let output_dir = match &cfg.output {
            Some(output) => anchor(config_dir, output),
            None => config_dir.join("output").join(underscored(&cfg.title)),
        };

        let course_slides = match &cfg.course_slides {
            Some(name) => anchor(&output_dir, name),
            None => output_dir.join(format!("{}.pdf", underscored(&cfg.title))),
        };

        let course_archive = match &cfg.course_archive {
            Some(name) => anchor(&output_dir, name),
            None => output_dir.join(format!("{}.zip", underscored(&cfg.title))),
        };

        let labs_archive = labs_archive_path(&course_archive);

        Self {
            config_dir: config_dir.to_path_buf(),
            root_dir,
            output_dir,
            course_slides,
            course_archive,
            labs_archive,
            watermark: cfg.watermark.as_ref().map(|w| anchor(config_dir, w)),
            renderer: cfg
                .renderer
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RENDERER)),
            shared_assets: cfg.assets.as_ref().map(|a| anchor(config_dir, a)),
        }
    }
}

/// `base/path` for relative paths, `path` itself for absolute ones.
pub fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// `<dir>/<stem>-labs.<ext>` next to the course archive.
pub fn labs_archive_path(course_archive: &Path) -> PathBuf {
    let stem = course_archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match course_archive.extension() {
        Some(ext) => format!("{stem}{LABS_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{LABS_SUFFIX}"),
    };
    course_archive.with_file_name(name)
}

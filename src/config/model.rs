// src/config/model.rs

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level configuration as read from a YAML file, before validation.
///
/// ```yaml
/// title: Company X delivery
/// root: lectures
/// output: out/company-x
/// watermark: stamp.pdf
/// course_slides: company-x-course.pdf
/// chapters:
///   Hello world:
///     root: hello-world
///     assets: resources
///     extras: [labs/hello]
///     lectures:
///       Hello world: hello-world.md
///       Variables: variables.md
/// ```
///
/// Required keys are kept optional here so that their absence is reported
/// as a configuration error naming the key rather than a YAML error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub title: Option<String>,

    /// Global root for lecture sources. Relative to the config file.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Output directory. Relative to the config file.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// One-page PDF drawn on top of every page of the merged deck.
    #[serde(default)]
    pub watermark: Option<PathBuf>,

    /// File name (or path) of the merged deck.
    #[serde(default, alias = "all_slides")]
    pub course_slides: Option<PathBuf>,

    /// File name (or path) of the course archive.
    #[serde(default)]
    pub course_archive: Option<PathBuf>,

    /// Renderer executable, `marp` from `PATH` when unset.
    #[serde(default, rename = "marp-cli", alias = "marp")]
    pub renderer: Option<PathBuf>,

    /// Shared asset directory linked into chapters without their own.
    #[serde(default)]
    pub assets: Option<PathBuf>,

    /// Chapters in declaration order.
    #[serde(default)]
    pub chapters: Option<IndexMap<String, RawChapterConfig>>,
}

/// One entry of `chapters`, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChapterConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub assets: Option<PathBuf>,

    #[serde(default)]
    pub extras: Vec<PathBuf>,

    #[serde(default, alias = "slides")]
    pub lectures: Option<IndexMap<String, PathBuf>>,
}

/// Validated configuration.
///
/// Constructed through `TryFrom<RawConfigFile>` (see `validate.rs`). CLI
/// overrides may still be applied in place before the file tree is built;
/// after that it is only ever borrowed.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub title: String,
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub watermark: Option<PathBuf>,
    pub course_slides: Option<PathBuf>,
    pub course_archive: Option<PathBuf>,
    pub renderer: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub chapters: IndexMap<String, ChapterConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct ChapterConfig {
    /// Chapter root, relative to the global root unless absolute.
    pub root: Option<PathBuf>,

    /// Asset directory symlinked into the chapter output.
    pub assets: Option<PathBuf>,

    /// Files or directories shipped verbatim in the course archive.
    pub extras: Vec<PathBuf>,

    /// Lecture title -> source path relative to the chapter root.
    pub lectures: IndexMap<String, PathBuf>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        raw: RawConfigFile,
        title: String,
        chapters: IndexMap<String, ChapterConfig>,
    ) -> Self {
        Self {
            title,
            root: raw.root,
            output: raw.output,
            watermark: raw.watermark,
            course_slides: raw.course_slides,
            course_archive: raw.course_archive,
            renderer: raw.renderer,
            assets: raw.assets,
            chapters,
        }
    }

    /// Total number of lectures across all chapters.
    pub fn lecture_count(&self) -> usize {
        self.chapters.values().map(|c| c.lectures.len()).sum()
    }
}

/// Title or chapter name as used for file and directory names.
pub fn underscored(name: &str) -> String {
    name.replace(' ', "_")
}

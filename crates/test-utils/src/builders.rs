#![allow(dead_code)]

use std::path::{Path, PathBuf};

use eely::config::{ConfigFile, RawChapterConfig, RawConfigFile};
use indexmap::IndexMap;

/// Builder for `ConfigFile` to simplify test setup.
///
/// Goes through the same `TryFrom<RawConfigFile>` validation as a YAML file.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            config: RawConfigFile {
                title: Some(title.to_string()),
                chapters: Some(IndexMap::new()),
                ..RawConfigFile::default()
            },
        }
    }

    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.config.root = Some(root.as_ref().to_path_buf());
        self
    }

    pub fn output(mut self, output: impl AsRef<Path>) -> Self {
        self.config.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn watermark(mut self, watermark: impl AsRef<Path>) -> Self {
        self.config.watermark = Some(watermark.as_ref().to_path_buf());
        self
    }

    pub fn course_slides(mut self, name: impl AsRef<Path>) -> Self {
        self.config.course_slides = Some(name.as_ref().to_path_buf());
        self
    }

    pub fn course_archive(mut self, name: impl AsRef<Path>) -> Self {
        self.config.course_archive = Some(name.as_ref().to_path_buf());
        self
    }

    pub fn assets(mut self, assets: impl AsRef<Path>) -> Self {
        self.config.assets = Some(assets.as_ref().to_path_buf());
        self
    }

    pub fn with_chapter(mut self, title: &str, chapter: RawChapterConfig) -> Self {
        self.config
            .chapters
            .get_or_insert_with(IndexMap::new)
            .insert(title.to_string(), chapter);
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

/// Builder for `RawChapterConfig`.
pub struct ChapterBuilder {
    chapter: RawChapterConfig,
}

impl ChapterBuilder {
    pub fn new() -> Self {
        Self {
            chapter: RawChapterConfig {
                lectures: Some(IndexMap::new()),
                ..RawChapterConfig::default()
            },
        }
    }

    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.chapter.root = Some(root.as_ref().to_path_buf());
        self
    }

    pub fn assets(mut self, assets: impl AsRef<Path>) -> Self {
        self.chapter.assets = Some(assets.as_ref().to_path_buf());
        self
    }

    pub fn extra(mut self, extra: impl AsRef<Path>) -> Self {
        self.chapter.extras.push(extra.as_ref().to_path_buf());
        self
    }

    pub fn lecture(mut self, title: &str, source: impl AsRef<Path>) -> Self {
        self.chapter
            .lectures
            .get_or_insert_with(IndexMap::new)
            .insert(title.to_string(), PathBuf::from(source.as_ref()));
        self
    }

    pub fn build(self) -> RawChapterConfig {
        self.chapter
    }
}

impl Default for ChapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

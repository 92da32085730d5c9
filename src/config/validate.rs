// src/config/validate.rs

use indexmap::IndexMap;

use crate::config::model::{ChapterConfig, ConfigFile, RawChapterConfig, RawConfigFile};
use crate::errors::{EelyError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = EelyError;

    fn try_from(mut raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let title = validate_title(raw.title.take())?;
        let chapters = validate_chapters(raw.chapters.take())?;
        Ok(ConfigFile::new_unchecked(raw, title, chapters))
    }
}

/// Re-check invariants that CLI overrides could have broken.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.title.trim().is_empty() {
        return Err(EelyError::ConfigError("`title` must not be empty".to_string()));
    }
    Ok(())
}

fn validate_title(title: Option<String>) -> Result<String> {
    match title {
        None => Err(EelyError::ConfigError(
            "missing required key `title`".to_string(),
        )),
        Some(t) if t.trim().is_empty() => {
            Err(EelyError::ConfigError("`title` must not be empty".to_string()))
        }
        Some(t) => Ok(t),
    }
}

fn validate_chapters(
    chapters: Option<IndexMap<String, RawChapterConfig>>,
) -> Result<IndexMap<String, ChapterConfig>> {
    let Some(chapters) = chapters else {
        return Err(EelyError::ConfigError(
            "missing required key `chapters`".to_string(),
        ));
    };

    if chapters.is_empty() {
        return Err(EelyError::ConfigError(
            "`chapters` must contain at least one chapter".to_string(),
        ));
    }

    chapters
        .into_iter()
        .map(|(title, chapter)| {
            let chapter = validate_chapter(&title, chapter)?;
            Ok((title, chapter))
        })
        .collect()
}

fn validate_chapter(title: &str, raw: RawChapterConfig) -> Result<ChapterConfig> {
    // The chapter name is the archive prefix for extras; an empty one would
    // put extras at the archive root next to the merged deck.
    if title.trim().is_empty() {
        return Err(EelyError::ConfigError(
            "chapter titles must not be empty".to_string(),
        ));
    }

    let Some(lectures) = raw.lectures else {
        return Err(EelyError::ConfigError(format!(
            "chapter '{title}' is missing `lectures`"
        )));
    };

    Ok(ChapterConfig {
        root: raw.root,
        assets: raw.assets,
        extras: raw.extras,
        lectures,
    })
}

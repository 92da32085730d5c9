// src/config/overrides.rs

use std::path::PathBuf;

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Values given on the command line that replace the document's own.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub title: Option<String>,
    pub output: Option<PathBuf>,
    pub course_slides: Option<PathBuf>,
    pub course_archive: Option<PathBuf>,
    pub watermark: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.output.is_none()
            && self.course_slides.is_none()
            && self.course_archive.is_none()
            && self.watermark.is_none()
    }
}

impl ConfigFile {
    /// Apply CLI overrides in place. Overrides always win.
    ///
    /// Must run before any path is resolved, since the title feeds the
    /// default output, deck and archive names.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        if let Some(title) = &overrides.title {
            self.title = title.clone();
        }
        if let Some(output) = &overrides.output {
            self.output = Some(output.clone());
        }
        if let Some(course_slides) = &overrides.course_slides {
            self.course_slides = Some(course_slides.clone());
        }
        if let Some(course_archive) = &overrides.course_archive {
            self.course_archive = Some(course_archive.clone());
        }
        if let Some(watermark) = &overrides.watermark {
            self.watermark = Some(watermark.clone());
        }
        validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::RawConfigFile;
    use crate::errors::EelyError;

    fn config() -> ConfigFile {
        let raw: RawConfigFile = serde_yaml::from_str(
            "title: Doc title\noutput: doc-out\nwatermark: doc.pdf\nchapters:\n  A:\n    lectures: {}\n",
        )
        .unwrap();
        ConfigFile::try_from(raw).unwrap()
    }

    #[test]
    fn overrides_win_over_document_values() {
        let mut cfg = config();
        let overrides = ConfigOverrides {
            title: Some("CLI title".to_string()),
            output: Some(PathBuf::from("cli-out")),
            course_slides: Some(PathBuf::from("deck.pdf")),
            course_archive: None,
            watermark: Some(PathBuf::from("cli.pdf")),
        };
        cfg.apply_overrides(&overrides).unwrap();

        assert_eq!(cfg.title, "CLI title");
        assert_eq!(cfg.output, Some(PathBuf::from("cli-out")));
        assert_eq!(cfg.course_slides, Some(PathBuf::from("deck.pdf")));
        assert_eq!(cfg.course_archive, None);
        assert_eq!(cfg.watermark, Some(PathBuf::from("cli.pdf")));
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut cfg = config();
        let overrides = ConfigOverrides::default();
        assert!(overrides.is_empty());
        cfg.apply_overrides(&overrides).unwrap();
        assert_eq!(cfg.title, "Doc title");
        assert_eq!(cfg.output, Some(PathBuf::from("doc-out")));
    }

    #[test]
    fn blank_title_override_is_rejected() {
        let mut cfg = config();
        let overrides = ConfigOverrides {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        let err = cfg.apply_overrides(&overrides).unwrap_err();
        assert!(matches!(err, EelyError::ConfigError(_)));
    }
}

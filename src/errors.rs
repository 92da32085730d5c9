// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is fatal for the current run: the pipeline stops at the
//! first error and `main.rs` reports it.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EelyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{kind} {} does not exist", path.display())]
    MissingSource { kind: &'static str, path: PathBuf },

    #[error("Link is wrong: {} -> {}", link.display(), target.display())]
    LinkError { link: PathBuf, target: PathBuf },

    #[error("Rendering {} failed (exit code {code:?}): {stderr}", source_path.display())]
    RenderError {
        source_path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("PDF error in {}: {source}", path.display())]
    PdfError {
        path: PathBuf,
        source: lopdf::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EelyError {
    pub(crate) fn missing(kind: &'static str, path: impl Into<PathBuf>) -> Self {
        EelyError::MissingSource {
            kind,
            path: path.into(),
        }
    }

    /// Adapter for `map_err` on `lopdf` results.
    pub(crate) fn pdf(path: &std::path::Path) -> impl FnOnce(lopdf::Error) -> Self + '_ {
        move |source| EelyError::PdfError {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, EelyError>;

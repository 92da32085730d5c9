// src/package/mod.rs

//! Course packaging, PDF mode only.
//!
//! Runs after the file tree is complete:
//!
//! 1. merge every lecture PDF into the course deck;
//! 2. stamp the watermark onto the deck, when configured;
//! 3. zip the deck together with the chapters' extras;
//! 4. derive the labs archive: the course archive without the deck.

pub mod archive;
pub mod merge;
pub mod pdf;
pub mod watermark;

use std::path::PathBuf;

use tracing::info;

use crate::config::ResolvedPaths;
use crate::errors::{EelyError, Result};
use crate::tree::FileTree;

pub use archive::{archive_entry_path, derive_labs_archive, zip_course_material};
pub use merge::{MergeStats, merge_course_slides, merge_pdfs};
pub use watermark::stamp_watermark;

/// Paths of the three packaging artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArtifacts {
    pub course_slides: PathBuf,
    pub course_archive: PathBuf,
    pub labs_archive: PathBuf,
}

pub fn package_course(tree: &FileTree, paths: &ResolvedPaths) -> Result<PackageArtifacts> {
    if let Some(watermark) = &paths.watermark
        && !watermark.is_file()
    {
        return Err(EelyError::missing("Watermark", watermark));
    }

    let stats = merge_course_slides(&tree.toc, &paths.course_slides)?;

    if let Some(watermark) = &paths.watermark {
        stamp_watermark(&paths.course_slides, watermark)?;
    }

    zip_course_material(&paths.course_archive, Some(&paths.course_slides), &tree.extras)?;

    let deck_name = paths
        .course_slides
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    derive_labs_archive(&paths.course_archive, &deck_name, &paths.labs_archive)?;

    info!(
        slides = %paths.course_slides.display(),
        pages = stats.pages,
        archive = %paths.course_archive.display(),
        labs = %paths.labs_archive.display(),
        "course packaged"
    );

    Ok(PackageArtifacts {
        course_slides: paths.course_slides.clone(),
        course_archive: paths.course_archive.clone(),
        labs_archive: paths.labs_archive.clone(),
    })
}

// src/tree/mod.rs

//! File-tree builder.
//!
//! Walks chapters and lectures in declaration order and materializes the
//! output directory:
//!
//! ```text
//! <output>/<Chapter_title>/<assets>          -> symlink to the asset dir
//! <output>/<Chapter_title>/000-<lecture>.<ext>
//! <output>/<Chapter_title>/001-<lecture>.<ext>
//! ```
//!
//! The result ([`FileTree`]) is complete before anything downstream (merge,
//! archive, index) looks at it. The first missing source aborts the build.

pub mod paths;
pub mod toc;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::config::paths::anchor;
use crate::config::{ChapterConfig, ConfigFile, ResolvedPaths, underscored};
use crate::errors::{EelyError, Result};
use crate::render::{Renderer, replace_symlink};
use crate::types::OutputKind;

pub use paths::{asset_link_path, chapter_root, lecture_file_name, normalize_lexically};
pub use toc::{ChapterEntry, ChapterExtras, ExtrasRegistry, LectureEntry, TableOfContents};

/// Everything the downstream steps need from the build.
#[derive(Debug, Clone)]
pub struct FileTree {
    pub toc: TableOfContents,
    pub output_dir: PathBuf,
    pub extras: ExtrasRegistry,
}

/// Build the output tree for `cfg`, rendering every lecture as `kind`.
pub async fn build_file_tree<R>(
    cfg: &ConfigFile,
    paths: &ResolvedPaths,
    kind: OutputKind,
    renderer: &mut R,
) -> Result<FileTree>
where
    R: Renderer + ?Sized,
{
    info!(
        title = %cfg.title,
        output = %paths.output_dir.display(),
        kind = %kind,
        chapters = cfg.chapters.len(),
        "building file tree"
    );

    let mut toc = TableOfContents::new();
    let mut extras = ExtrasRegistry::new();

    for (chapter_title, chapter) in cfg.chapters.iter() {
        let root = chapter_root(&paths.root_dir, chapter.root.as_deref());
        let chapter_output = paths.output_dir.join(underscored(chapter_title));

        debug!(
            chapter = %chapter_title,
            root = %root.display(),
            output = %chapter_output.display(),
            "building chapter"
        );

        fs::create_dir_all(&chapter_output)
            .with_context(|| format!("creating directory {}", chapter_output.display()))?;

        link_chapter_assets(cfg, paths, chapter, &root, &chapter_output)?;

        let chapter_extras = resolve_extras(chapter, &root)?;
        if !chapter_extras.is_empty() {
            extras.insert(
                chapter_title.clone(),
                ChapterExtras {
                    root: normalize_lexically(&root),
                    extras: chapter_extras,
                },
            );
        }

        let mut lectures = Vec::with_capacity(chapter.lectures.len());
        for (index, (lecture_title, lecture_path)) in chapter.lectures.iter().enumerate() {
            let source = root.join(lecture_path);
            if !source.is_file() {
                return Err(EelyError::missing("Lecture", source));
            }

            let destination =
                chapter_output.join(lecture_file_name(index, lecture_path, kind.extension())?);

            renderer.render(kind, &source, &destination).await?;

            debug!(
                chapter = %chapter_title,
                lecture = %lecture_title,
                destination = %destination.display(),
                "lecture done"
            );

            lectures.push(LectureEntry {
                title: lecture_title.clone(),
                path: destination,
            });
        }

        info!(
            chapter = %chapter_title,
            lectures = lectures.len(),
            "chapter built"
        );

        toc.push_chapter(ChapterEntry {
            title: chapter_title.clone(),
            lectures,
        });
    }

    Ok(FileTree {
        toc,
        output_dir: paths.output_dir.clone(),
        extras,
    })
}

/// Link the chapter's asset directory, or the shared one, into its output.
fn link_chapter_assets(
    cfg: &ConfigFile,
    paths: &ResolvedPaths,
    chapter: &ChapterConfig,
    root: &Path,
    chapter_output: &Path,
) -> Result<()> {
    let (declared, source) = match (&chapter.assets, &cfg.assets, &paths.shared_assets) {
        (Some(declared), _, _) => (declared.as_path(), anchor(root, declared)),
        (None, Some(declared), Some(shared)) => (declared.as_path(), shared.clone()),
        _ => return Ok(()),
    };

    if !source.is_dir() {
        return Err(EelyError::missing("Asset directory", source));
    }

    let link = asset_link_path(chapter_output, declared);
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    replace_symlink(&source, &link, true)
}

/// Resolve and check a chapter's extras.
///
/// Paths come back normalized so that `root/../x` no longer counts as being
/// under `root` when archive names are computed.
fn resolve_extras(chapter: &ChapterConfig, root: &Path) -> Result<Vec<PathBuf>> {
    chapter
        .extras
        .iter()
        .map(|extra| {
            let path = anchor(root, extra);
            if path.exists() {
                Ok(normalize_lexically(&path))
            } else {
                Err(EelyError::missing("Extra file", path))
            }
        })
        .collect()
}

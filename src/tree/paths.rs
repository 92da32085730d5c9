// src/tree/paths.rs

//! Path arithmetic for the output tree.

use std::path::{Component, Path, PathBuf};

use crate::config::paths::anchor;
use crate::errors::{EelyError, Result};

/// Width of the lecture number prefix (`000-`, `001-`, ...).
pub const LECTURE_NUMBER_WIDTH: usize = 3;

/// Effective root of a chapter: its own root (absolute, or relative to the
/// global root), else the global root.
pub fn chapter_root(global_root: &Path, chapter_root: Option<&Path>) -> PathBuf {
    match chapter_root {
        Some(root) => anchor(global_root, root),
        None => global_root.to_path_buf(),
    }
}

/// `<NNN>-<source file name>` with the extension replaced.
///
/// The number keeps directory listings (and `marp --server`) in declaration
/// order whatever the original file names are.
pub fn lecture_file_name(index: usize, source: &Path, extension: &str) -> Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| {
        EelyError::ConfigError(format!(
            "lecture path {} has no file name",
            source.display()
        ))
    })?;

    let numbered = PathBuf::from(format!(
        "{:0width$}-{}",
        index,
        name.to_string_lossy(),
        width = LECTURE_NUMBER_WIDTH
    ));
    Ok(numbered.with_extension(extension))
}

/// Where an asset directory declared as `declared` is linked in a chapter.
///
/// Relative declarations keep their shape under the chapter output; absolute
/// ones are linked under their directory name.
pub fn asset_link_path(chapter_output: &Path, declared: &Path) -> PathBuf {
    if declared.is_absolute() {
        match declared.file_name() {
            Some(name) => chapter_output.join(name),
            None => chapter_output.join("assets"),
        }
    } else {
        chapter_output.join(declared)
    }
}

/// `path` with `.` and `..` resolved textually.
///
/// Symlinks are not followed, so a linked extra keeps its declared name.
/// A `..` that would climb above the start of the path is dropped.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

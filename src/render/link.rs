// src/render/link.rs

//! Symlink helpers used for lecture links and asset directories.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::errors::{EelyError, Result};

/// Replace whatever sits at `link` with a symlink pointing at `target`.
///
/// Existing symlinks (dangling ones included) and files are removed first,
/// so re-running never fails on, or duplicates, a previous link. The link
/// must resolve afterwards, otherwise [`EelyError::LinkError`] is returned.
pub fn replace_symlink(target: &Path, link: &Path, target_is_dir: bool) -> Result<()> {
    if let Ok(meta) = fs::symlink_metadata(link) {
        debug!(link = %link.display(), "removing existing entry");
        remove_entry(link, &meta).with_context(|| format!("removing {}", link.display()))?;
    }

    create_symlink(target, link, target_is_dir).with_context(|| {
        format!(
            "creating symlink {} -> {}",
            link.display(),
            target.display()
        )
    })?;

    // `exists` follows the link.
    if !link.exists() {
        return Err(EelyError::LinkError {
            link: link.to_path_buf(),
            target: target.to_path_buf(),
        });
    }

    debug!(link = %link.display(), target = %target.display(), "symlink created");
    Ok(())
}

#[cfg(unix)]
fn remove_entry(link: &Path, _meta: &fs::Metadata) -> io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_entry(link: &Path, meta: &fs::Metadata) -> io::Result<()> {
    use std::os::windows::fs::FileTypeExt;
    if meta.file_type().is_symlink_dir() {
        fs::remove_dir(link)
    } else {
        fs::remove_file(link)
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path, _target_is_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path, target_is_dir: bool) -> io::Result<()> {
    if target_is_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

// src/package/archive.rs

//! Course and labs archives.
//!
//! Layout of the course archive:
//!
//! ```text
//! <deck file name>                         merged deck, when there is one
//! <Chapter_title>/<path relative to root>  extras under the chapter root
//! <Chapter_title>/<extra name>/...         extras outside of it
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Component, Path};

use anyhow::Context;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::underscored;
use crate::errors::Result;
use crate::tree::ExtrasRegistry;

/// Write the course archive. Returns the number of entries written.
pub fn zip_course_material(
    archive: &Path,
    course_slides: Option<&Path>,
    extras: &ExtrasRegistry,
) -> Result<usize> {
    if let Some(parent) = archive.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let file =
        File::create(archive).with_context(|| format!("creating {}", archive.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = 0;

    if let Some(deck) = course_slides {
        let name = file_name(deck);
        add_file(&mut zip, deck, &name, deflated)?;
        entries += 1;
    }

    for (chapter_title, chapter) in extras {
        let prefix = underscored(chapter_title);

        for extra in &chapter.extras {
            if !extra.is_dir() {
                let name = archive_entry_path(&prefix, &chapter.root, extra, extra);
                add_file(&mut zip, extra, &name, deflated)?;
                entries += 1;
                continue;
            }

            for entry in WalkDir::new(extra)
                .min_depth(1)
                .follow_links(true)
                .sort_by_file_name()
            {
                let entry = entry.with_context(|| format!("walking {}", extra.display()))?;
                let name = archive_entry_path(&prefix, &chapter.root, extra, entry.path());

                if entry.file_type().is_dir() {
                    debug!(entry = %name, "adding directory");
                    zip.add_directory(format!("{name}/"), deflated)?;
                } else {
                    add_file(&mut zip, entry.path(), &name, deflated)?;
                }
                entries += 1;
            }
        }
    }

    zip.finish()?;

    info!(
        archive = %archive.display(),
        entries,
        "course archive written"
    );
    Ok(entries)
}

/// Archive name of `file`, which is `extra` itself or lies below it.
///
/// Extras under the chapter root keep their path relative to the root.
/// Extras elsewhere keep their path relative to the extra's parent, so a
/// directory `/abs/labs` contributes `labs/...` entries.
pub fn archive_entry_path(prefix: &str, root: &Path, extra: &Path, file: &Path) -> String {
    let relative = match file.strip_prefix(root) {
        Ok(rel) if extra.starts_with(root) => rel.to_path_buf(),
        _ => match extra.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => file
                .strip_prefix(parent)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| file_name(file).into()),
            _ => file.to_path_buf(),
        },
    };

    let mut name = String::from(prefix);
    for component in relative.components() {
        if let Component::Normal(part) = component {
            name.push('/');
            name.push_str(&part.to_string_lossy());
        }
    }
    name
}

/// Copy `course_archive` to `labs_archive`, leaving out the entry named
/// `exclude`. Entries are copied without recompression.
///
/// Returns the number of entries in the labs archive.
pub fn derive_labs_archive(
    course_archive: &Path,
    exclude: &str,
    labs_archive: &Path,
) -> Result<usize> {
    let source = File::open(course_archive)
        .with_context(|| format!("opening {}", course_archive.display()))?;
    let mut input = ZipArchive::new(BufReader::new(source))?;

    let target = File::create(labs_archive)
        .with_context(|| format!("creating {}", labs_archive.display()))?;
    let mut output = ZipWriter::new(BufWriter::new(target));

    let mut kept = 0;
    let mut excluded = 0;
    for index in 0..input.len() {
        let entry = input.by_index_raw(index)?;
        if entry.name() == exclude {
            excluded += 1;
            continue;
        }
        output.raw_copy_file(entry)?;
        kept += 1;
    }
    output.finish()?;

    if excluded > 1 {
        warn!(
            archive = %course_archive.display(),
            entry = exclude,
            excluded,
            "more than one entry matched the excluded name"
        );
    }

    info!(
        archive = %labs_archive.display(),
        entries = kept,
        excluded,
        "labs archive written"
    );
    Ok(kept)
}

fn add_file<W: io::Write + io::Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    debug!(entry = %name, source = %path.display(), "adding file");
    zip.start_file(name, options)?;
    let mut reader =
        BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    io::copy(&mut reader, zip).with_context(|| format!("compressing {}", path.display()))?;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

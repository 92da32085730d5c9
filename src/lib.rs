// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod index;
pub mod logging;
pub mod package;
pub mod render;
pub mod tree;
pub mod types;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, ResolvedPaths, config_dir, load_and_validate, underscored};
use crate::index::{DEFAULT_INDEX_CSS, write_index};
use crate::package::{PackageArtifacts, package_course};
use crate::render::{RealRenderer, Renderer};
use crate::tree::{FileTree, build_file_tree, chapter_root, lecture_file_name};
use crate::types::OutputKind;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and command-line overrides
/// - path resolution
/// - the file tree, rendered by the real renderer
/// - packaging (PDF mode) and the index page
pub async fn run(args: CliArgs) -> Result<()> {
    let (kind, config_path) = args
        .mode
        .selected()
        .ok_or_else(|| anyhow!("one of --link, --html or --pdf is required"))?;

    let mut cfg = load_and_validate(config_path)?;
    let overrides = args.overrides();
    if !overrides.is_empty() {
        debug!(?overrides, "applying command-line overrides");
        cfg.apply_overrides(&overrides)?;
    }

    let paths = ResolvedPaths::resolve(&cfg, &config_dir(config_path)?);

    if args.dry_run {
        print_dry_run(&cfg, &paths, kind)?;
        return Ok(());
    }

    let css = match &args.css {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading stylesheet {}", path.display()))?,
        None => DEFAULT_INDEX_CSS.to_string(),
    };

    let mut renderer = RealRenderer::new(paths.renderer.clone());
    let output = build_course(&cfg, &paths, kind, &mut renderer, &css).await?;

    println!("Generated course page at: {}", output.index.display());
    Ok(())
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct CourseOutput {
    pub tree: FileTree,
    pub artifacts: Option<PackageArtifacts>,
    pub index: PathBuf,
}

/// Build the file tree, package it when `kind` calls for it, and write the
/// index page.
pub async fn build_course<R>(
    cfg: &ConfigFile,
    paths: &ResolvedPaths,
    kind: OutputKind,
    renderer: &mut R,
    css: &str,
) -> errors::Result<CourseOutput>
where
    R: Renderer + ?Sized,
{
    let tree = build_file_tree(cfg, paths, kind, renderer).await?;

    let artifacts = if kind.packages_material() {
        Some(package_course(&tree, paths)?)
    } else {
        None
    };

    let index = write_index(
        &tree.toc,
        &tree.output_dir,
        &cfg.title,
        css,
        artifacts.as_ref(),
    )?;

    info!(
        chapters = tree.toc.len(),
        lectures = tree.toc.lecture_count(),
        index = %index.display(),
        "course built"
    );

    Ok(CourseOutput {
        tree,
        artifacts,
        index,
    })
}

/// Dry-run output: print the resolved plan.
fn print_dry_run(cfg: &ConfigFile, paths: &ResolvedPaths, kind: OutputKind) -> errors::Result<()> {
    println!("eely dry-run");
    println!("  title = {}", cfg.title);
    println!("  mode = {kind}");
    println!("  root = {}", paths.root_dir.display());
    println!("  output = {}", paths.output_dir.display());
    if kind != OutputKind::Link {
        println!("  renderer = {}", paths.renderer.display());
    }
    if kind.packages_material() {
        println!("  course_slides = {}", paths.course_slides.display());
        println!("  course_archive = {}", paths.course_archive.display());
        println!("  labs_archive = {}", paths.labs_archive.display());
        if let Some(watermark) = &paths.watermark {
            println!("  watermark = {}", watermark.display());
        }
    }
    println!();

    println!("chapters ({}):", cfg.chapters.len());
    for (title, chapter) in cfg.chapters.iter() {
        let root = chapter_root(&paths.root_dir, chapter.root.as_deref());
        println!("  - {title}");
        println!("      root: {}", root.display());
        if let Some(assets) = &chapter.assets {
            println!("      assets: {}", assets.display());
        }
        if !chapter.extras.is_empty() {
            println!("      extras: {:?}", chapter.extras);
        }
        for (index, (lecture, source)) in chapter.lectures.iter().enumerate() {
            let name = lecture_file_name(index, source, kind.extension())?;
            println!(
                "      {lecture}: {} -> {}/{}",
                source.display(),
                underscored(title),
                name.display()
            );
        }
    }

    debug!("dry-run complete (nothing written)");
    Ok(())
}

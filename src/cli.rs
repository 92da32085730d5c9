// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, ValueEnum};

use crate::config::ConfigOverrides;
use crate::types::OutputKind;

/// Command-line arguments for `eely`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eely",
    version,
    about = "Build a course site (and in PDF mode, a merged deck and archives) from a YAML course config.",
    long_about = None
)]
pub struct CliArgs {
    #[command(flatten)]
    pub mode: ModeArgs,

    /// CSS file used for the index page instead of the built-in style.
    #[arg(long, value_name = "PATH")]
    pub css: Option<PathBuf>,

    /// Override `title`.
    #[arg(long, alias = "config_title", value_name = "TITLE")]
    pub config_title: Option<String>,

    /// Override `output`.
    #[arg(long, alias = "config_output", value_name = "PATH")]
    pub config_output: Option<PathBuf>,

    /// Override `course_slides`.
    #[arg(long, alias = "config_course_slides", value_name = "PATH")]
    pub config_course_slides: Option<PathBuf>,

    /// Override `course_archive`.
    #[arg(long, alias = "config_course_archive", value_name = "PATH")]
    pub config_course_archive: Option<PathBuf>,

    /// Override `watermark`.
    #[arg(long, alias = "config_watermark", value_name = "PATH")]
    pub config_watermark: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EELY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate the config, print what would be built, touch nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Output mode. Exactly one must be given; its value is the config file.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct ModeArgs {
    /// Symlink lecture sources into the output tree.
    #[arg(long, value_name = "CONFIG")]
    pub link: Option<PathBuf>,

    /// Render lectures to HTML.
    #[arg(long, value_name = "CONFIG")]
    pub html: Option<PathBuf>,

    /// Render lectures to PDF and package the course.
    #[arg(long, value_name = "CONFIG")]
    pub pdf: Option<PathBuf>,
}

impl ModeArgs {
    /// The selected output kind and its config file.
    pub fn selected(&self) -> Option<(OutputKind, &Path)> {
        [
            (OutputKind::Link, &self.link),
            (OutputKind::Html, &self.html),
            (OutputKind::Pdf, &self.pdf),
        ]
        .into_iter()
        .find_map(|(kind, path)| path.as_deref().map(|p| (kind, p)))
    }
}

impl CliArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            title: self.config_title.clone(),
            output: self.config_output.clone(),
            course_slides: self.config_course_slides.clone(),
            course_archive: self.config_course_archive.clone(),
            watermark: self.config_watermark.clone(),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

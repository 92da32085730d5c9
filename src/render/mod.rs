// src/render/mod.rs

//! Renderer dispatcher.
//!
//! The file-tree builder hands every lecture to a [`Renderer`] instead of
//! touching the filesystem or spawning processes itself. This keeps the
//! production renderer in one place and lets tests swap in a fake one.
//!
//! - [`RealRenderer`] creates symlinks for [`OutputKind::Link`] and runs the
//!   external renderer for HTML and PDF output.
//! - [`command`] holds the typed renderer command line.
//! - [`link`] holds the symlink replacement helper, shared with the asset
//!   directory links.

pub mod command;
pub mod link;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::errors::Result;
use crate::types::OutputKind;

pub use command::RendererCommand;
pub use link::replace_symlink;

/// Turns one lecture source into its destination artifact.
pub trait Renderer: Send {
    /// Produce `destination` from `source`.
    ///
    /// `source` is known to exist. Implementations must leave a complete
    /// artifact at `destination` or fail; the pipeline stops on the first
    /// error.
    fn render<'a>(
        &'a mut self,
        kind: OutputKind,
        source: &'a Path,
        destination: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Production renderer: symlinks, or the external `marp`-compatible tool.
#[derive(Debug, Clone)]
pub struct RealRenderer {
    program: PathBuf,
}

impl RealRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Renderer for RealRenderer {
    fn render<'a>(
        &'a mut self,
        kind: OutputKind,
        source: &'a Path,
        destination: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            match RendererCommand::for_kind(kind, &self.program, source, destination) {
                None => replace_symlink(source, destination, false),
                Some(cmd) => cmd.run().await,
            }
        })
    }
}

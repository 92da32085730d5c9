// src/render/command.rs

//! Typed command line for the external slide renderer.

use std::ffi::OsString;
use std::path::{Component, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{EelyError, Result};
use crate::types::OutputKind;

const HTML_FLAG: &str = "--html";
const PDF_FLAG: &str = "--pdf";
const ALLOW_LOCAL_FILES_FLAG: &str = "--allow-local-files";
const OUTPUT_FLAG: &str = "-o";

/// `<renderer> <source> <format flags> --allow-local-files -o <destination>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererCommand {
    program: PathBuf,
    source: PathBuf,
    destination: PathBuf,
    format_flags: Vec<&'static str>,
}

impl RendererCommand {
    pub fn new(
        program: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            source: source.into(),
            destination: destination.into(),
            format_flags: Vec::new(),
        }
    }

    /// Emit HTML. Also honours raw HTML tags inside the slides.
    pub fn html(mut self) -> Self {
        self.push_flag(HTML_FLAG);
        self
    }

    /// Emit PDF.
    pub fn pdf(mut self) -> Self {
        self.push_flag(PDF_FLAG);
        self
    }

    /// Command for a rendered output kind.
    ///
    /// PDF output carries `--html` too, so embedded HTML is rendered into the
    /// PDF instead of being dropped. Links are not rendered.
    pub fn for_kind(
        kind: OutputKind,
        program: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Option<Self> {
        let cmd = Self::new(program, source, destination);
        match kind {
            OutputKind::Link => None,
            OutputKind::Html => Some(cmd.html()),
            OutputKind::Pdf => Some(cmd.html().pdf()),
        }
    }

    fn push_flag(&mut self, flag: &'static str) {
        if !self.format_flags.contains(&flag) {
            self.format_flags.push(flag);
        }
    }

    /// Arguments passed to the renderer, in order.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.format_flags.len() + 4);
        args.push(self.source.clone().into_os_string());
        args.extend(self.format_flags.iter().map(OsString::from));
        args.push(OsString::from(ALLOW_LOCAL_FILES_FLAG));
        args.push(OsString::from(OUTPUT_FLAG));
        args.push(self.destination.clone().into_os_string());
        args
    }

    /// Locate the executable.
    ///
    /// Paths with a directory part are checked on disk as given; bare names
    /// are looked up on `PATH`.
    pub fn resolve_program(&self) -> Result<PathBuf> {
        let has_dir = self
            .program
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
            || self.program.components().count() > 1;

        if has_dir {
            if self.program.is_file() {
                return Ok(self.program.clone());
            }
            return Err(self.not_found());
        }

        which::which(&self.program).map_err(|_| self.not_found())
    }

    fn not_found(&self) -> EelyError {
        EelyError::RenderError {
            source_path: self.source.clone(),
            code: None,
            stderr: format!("renderer executable {} not found", self.program.display()),
        }
    }

    /// Run the renderer to completion.
    ///
    /// Output lines are forwarded to the log at debug level; stderr is also
    /// kept so a failure can report it.
    pub async fn run(&self) -> Result<()> {
        let program = self.resolve_program()?;

        info!(
            source = %self.source.display(),
            destination = %self.destination.display(),
            "rendering lecture"
        );

        let mut child = Command::new(&program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawning renderer {}", program.display()))?;

        // Drain both pipes so the child never blocks on a full buffer.
        let stdout_task = child.stdout.take().map(|stdout| {
            let source = self.source.display().to_string();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(source = %source, "renderer: {}", line);
                }
            })
        });

        let stderr_task = child.stderr.take().map(|stderr| {
            let source = self.source.display().to_string();
            tokio::spawn(async move {
                let mut captured = Vec::new();
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(source = %source, "renderer stderr: {}", line);
                    captured.push(line);
                }
                captured
            })
        });

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for renderer on {}", self.source.display()))?;

        if let Some(task) = stdout_task {
            let _ = task.await;
        }
        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default().join("\n"),
            None => String::new(),
        };

        debug!(
            source = %self.source.display(),
            exit_code = ?status.code(),
            success = status.success(),
            "renderer exited"
        );

        if !status.success() {
            return Err(EelyError::RenderError {
                source_path: self.source.clone(),
                code: status.code(),
                stderr,
            });
        }

        Ok(())
    }
}

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use eely::errors::{EelyError, Result};
use eely::render::{Renderer, replace_symlink};
use eely::types::OutputKind;

use crate::pdf::write_pdf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    pub kind: OutputKind,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// A renderer that never spawns anything:
/// - links like the real one
/// - writes an n-page PDF or a placeholder HTML page
/// - records every call, and can be told to fail on one source.
#[derive(Clone)]
pub struct FakeRenderer {
    pages_per_lecture: usize,
    fail_on: Option<(String, i32)>,
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl FakeRenderer {
    pub fn new(pages_per_lecture: usize) -> Self {
        Self {
            pages_per_lecture,
            fail_on: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail with `code` when the source file name equals `file_name`.
    pub fn failing_on(mut self, file_name: &str, code: i32) -> Self {
        self.fail_on = Some((file_name.to_string(), code));
        self
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }

    fn should_fail(&self, source: &Path) -> Option<i32> {
        let (name, code) = self.fail_on.as_ref()?;
        (source.file_name()?.to_str()? == name).then_some(*code)
    }
}

impl Renderer for FakeRenderer {
    fn render<'a>(
        &'a mut self,
        kind: OutputKind,
        source: &'a Path,
        destination: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(RenderCall {
                kind,
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
            });

            if let Some(code) = self.should_fail(source) {
                return Err(EelyError::RenderError {
                    source_path: source.to_path_buf(),
                    code: Some(code),
                    stderr: "fake renderer failure".to_string(),
                });
            }

            match kind {
                OutputKind::Link => replace_symlink(source, destination, false),
                OutputKind::Html => {
                    std::fs::write(
                        destination,
                        format!("<html><body>{}</body></html>", source.display()),
                    )?;
                    Ok(())
                }
                OutputKind::Pdf => {
                    write_pdf(destination, self.pages_per_lecture)?;
                    Ok(())
                }
            }
        })
    }
}

// src/index.rs

//! Index page generator.
//!
//! Produces `<output>/index.html`: the course title, a numbered two-level
//! list of chapters and lectures, and in PDF mode links to the packaging
//! artifacts.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::info;

use crate::errors::Result;
use crate::package::PackageArtifacts;
use crate::tree::TableOfContents;

pub const INDEX_FILE_NAME: &str = "index.html";

/// Stylesheet used when no `--css` file is given.
pub const DEFAULT_INDEX_CSS: &str = r#"
    ol {
        counter-reset: item;
        font-size: 28pt;
    }

    ol ol {
        font-size: 24pt;
    }

    ol li {
        display: block;
    }

    ol li:before {
        content: counters(item, ".") ". ";
        counter-increment: item;
    }

    body {
        background: linear-gradient(to right, #d7d2cc 0%, #304352 100%);
    }
"#;

const ARTIFACT_LINK_STYLE: &str = "font-size: 24pt";

/// Render the index page.
///
/// `css` is embedded verbatim. Lecture links are relative to `index_dir`;
/// artifact links are relative when they live under it and absolute
/// otherwise.
pub fn render_index(
    toc: &TableOfContents,
    index_dir: &Path,
    title: &str,
    css: &str,
    artifacts: Option<&PackageArtifacts>,
) -> String {
    let mut html = HtmlWriter::default();

    html.open("<html>");
    html.open("<head>");
    html.line(&format!("<title>{}</title>", encode_text(title)));
    html.open("<style>");
    html.raw(css);
    html.close("</style>");
    html.close("</head>");

    html.open("<body>");
    html.line(&format!("<h1>{}</h1>", encode_text(title)));

    html.open(r#"<ol type="1">"#);
    for chapter in toc.chapters() {
        html.open("<li>");
        html.line(&encode_text(&chapter.title));
        html.open(r#"<ol type="1">"#);
        for lecture in &chapter.lectures {
            html.line(&format!(
                r#"<li><a href="{}">{}</a></li>"#,
                encode_double_quoted_attribute(&href(index_dir, &lecture.path)),
                encode_text(&lecture.title)
            ));
        }
        html.close("</ol>");
        html.close("</li>");
    }
    html.close("</ol>");

    if let Some(artifacts) = artifacts {
        html.line("<hr />");
        let links = [
            (&artifacts.course_slides, "Course slides"),
            (&artifacts.labs_archive, "Labs archive"),
            (&artifacts.course_archive, "Course archive"),
        ];
        for (i, (path, label)) in links.into_iter().enumerate() {
            if i > 0 {
                html.line("<br />");
            }
            html.line(&format!(
                r#"<a href="{}" style="{ARTIFACT_LINK_STYLE}">{label}</a>"#,
                encode_double_quoted_attribute(&href(index_dir, path)),
            ));
        }
    }

    html.close("</body>");
    html.close("</html>");
    html.finish()
}

/// Render and write `<index_dir>/index.html`. Returns its path.
pub fn write_index(
    toc: &TableOfContents,
    index_dir: &Path,
    title: &str,
    css: &str,
    artifacts: Option<&PackageArtifacts>,
) -> Result<PathBuf> {
    let index_path = index_dir.join(INDEX_FILE_NAME);
    let page = render_index(toc, index_dir, title, css, artifacts);

    fs::create_dir_all(index_dir)
        .with_context(|| format!("creating directory {}", index_dir.display()))?;
    fs::write(&index_path, page)
        .with_context(|| format!("writing {}", index_path.display()))?;

    info!(index = %index_path.display(), "index page written");
    Ok(index_path)
}

/// Link target for `path` as seen from `index_dir`, with `/` separators.
fn href(index_dir: &Path, path: &Path) -> String {
    match path.strip_prefix(index_dir) {
        Ok(relative) => relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

#[derive(Default)]
struct HtmlWriter {
    out: String,
    depth: usize,
}

impl HtmlWriter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(tag);
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(tag);
    }

    /// Unindented, untouched.
    fn raw(&mut self, text: &str) {
        self.out.push_str(text.trim_matches('\n'));
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ChapterEntry, LectureEntry};

    fn toc() -> TableOfContents {
        let mut toc = TableOfContents::new();
        toc.push_chapter(ChapterEntry {
            title: "Hello world".to_string(),
            lectures: vec![
                LectureEntry {
                    title: "Hello world".to_string(),
                    path: PathBuf::from("/out/Hello_world/000-hello-world.html"),
                },
                LectureEntry {
                    title: "Tips & <tricks>".to_string(),
                    path: PathBuf::from("/out/Hello_world/001-tips.html"),
                },
            ],
        });
        toc.push_chapter(ChapterEntry {
            title: "Data types".to_string(),
            lectures: vec![],
        });
        toc
    }

    #[test]
    fn lectures_are_linked_relative_to_the_index() {
        let page = render_index(&toc(), Path::new("/out"), "Course", "body {}", None);

        assert!(page.contains("<title>Course</title>"));
        assert!(page.contains("<h1>Course</h1>"));
        assert!(page.contains(r#"<a href="Hello_world/000-hello-world.html">Hello world</a>"#));
        assert!(page.contains("Tips &amp; &lt;tricks&gt;"));
        assert!(page.contains("body {}"));
        assert!(!page.contains("<hr />"));

        let hello = page.find("Hello world").unwrap();
        let data = page.find("Data types").unwrap();
        assert!(hello < data);
    }

    #[test]
    fn artifacts_are_listed_in_pdf_mode() {
        let artifacts = PackageArtifacts {
            course_slides: PathBuf::from("/out/Course.pdf"),
            course_archive: PathBuf::from("/elsewhere/Course.zip"),
            labs_archive: PathBuf::from("/elsewhere/Course-labs.zip"),
        };
        let page = render_index(
            &toc(),
            Path::new("/out"),
            "Course",
            DEFAULT_INDEX_CSS,
            Some(&artifacts),
        );

        let slides = page
            .find(r#"<a href="Course.pdf" style="font-size: 24pt">Course slides</a>"#)
            .unwrap();
        let labs = page
            .find(r#"<a href="/elsewhere/Course-labs.zip" style="font-size: 24pt">Labs archive</a>"#)
            .unwrap();
        let archive = page
            .find(r#"<a href="/elsewhere/Course.zip" style="font-size: 24pt">Course archive</a>"#)
            .unwrap();
        assert!(page.find("<hr />").unwrap() < slides);
        assert!(slides < labs && labs < archive);
        assert_eq!(page.matches("<br />").count(), 2);
        assert!(page.contains("counters(item, \".\")"));
    }

    #[test]
    fn write_index_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_index(&toc(), dir.path(), "Course", "", None).unwrap();
        assert_eq!(path, dir.path().join("index.html"));
        assert!(fs::read_to_string(path).unwrap().starts_with("<html>"));
    }
}

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

use eely::build_course;
use eely::config::ResolvedPaths;
use eely::index::DEFAULT_INDEX_CSS;
use eely::package::watermark::WATERMARK_XOBJECT;
use eely::package::{merge_pdfs, stamp_watermark};
use eely::types::OutputKind;
use eely_test_utils::builders::{ChapterBuilder, ConfigFileBuilder};
use eely_test_utils::fake_renderer::FakeRenderer;
use eely_test_utils::pdf::{page_contents, page_count, write_pdf, write_pdf_with_box};
use eely_test_utils::touch;
use lopdf::Document;
use zip::ZipArchive;

type TestResult = Result<(), Box<dyn Error>>;

fn entry_names(archive: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut zip = ZipArchive::new(File::open(archive)?)?;
    let mut names = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        names.push(zip.by_index(i)?.name().to_string());
    }
    Ok(names)
}

/// Two chapters, three lectures, one chapter with extras.
fn course_in(dir: &Path) -> eely::config::ConfigFile {
    let src = dir.join("src");
    touch(&src.join("basics/intro.md"), "# Intro");
    touch(&src.join("basics/loops.md"), "# Loops");
    touch(&src.join("advanced/traits.md"), "# Traits");
    touch(&src.join("basics/labs/a.txt"), "lab a");
    touch(&src.join("basics/labs/b.txt"), "lab b");

    ConfigFileBuilder::new("Rust course")
        .root("src")
        .output("out")
        .with_chapter(
            "Basics",
            ChapterBuilder::new()
                .root("basics")
                .extra("labs")
                .lecture("Intro", "intro.md")
                .lecture("Loops", "loops.md")
                .build(),
        )
        .with_chapter(
            "Advanced topics",
            ChapterBuilder::new()
                .root("advanced")
                .lecture("Traits", "traits.md")
                .build(),
        )
        .build()
}

#[tokio::test]
async fn pdf_mode_merges_and_packages_the_course() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = course_in(dir.path());
        let paths = ResolvedPaths::resolve(&cfg, dir.path());
        let mut renderer = FakeRenderer::new(2);

        let course =
            build_course(&cfg, &paths, OutputKind::Pdf, &mut renderer, DEFAULT_INDEX_CSS).await?;

        let calls = renderer.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.kind == OutputKind::Pdf));
        assert_eq!(
            calls[2].destination,
            dir.path().join("out/Advanced_topics/000-traits.pdf")
        );

        let artifacts = course.artifacts.expect("pdf mode packages material");
        assert_eq!(
            artifacts.course_slides,
            dir.path().join("out/Rust_course.pdf")
        );
        assert_eq!(page_count(&artifacts.course_slides), 6);

        assert_eq!(
            entry_names(&artifacts.course_archive)?,
            vec!["Rust_course.pdf", "Basics/labs/a.txt", "Basics/labs/b.txt"]
        );
        assert_eq!(
            entry_names(&artifacts.labs_archive)?,
            vec!["Basics/labs/a.txt", "Basics/labs/b.txt"]
        );
        assert_eq!(
            artifacts.labs_archive,
            dir.path().join("out/Rust_course-labs.zip")
        );

        let index = fs::read_to_string(&course.index)?;
        assert!(index.contains(r#"<a href="Rust_course.pdf" style="font-size: 24pt">Course slides</a>"#));
        assert!(index.contains(r#"href="Rust_course-labs.zip""#));
        assert!(index.contains(r#"href="Basics/001-loops.pdf""#));

        Ok(())
    })
    .await
}

#[tokio::test]
async fn extras_above_the_chapter_root_keep_only_their_name() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        touch(&dir.path().join("ch/intro.md"), "# Intro");
        touch(&dir.path().join("shared/labs/a.txt"), "lab a");
        touch(&dir.path().join("ch/notes/b.txt"), "notes");
        let cfg = ConfigFileBuilder::new("C")
            .output("out")
            .with_chapter(
                "Ch",
                ChapterBuilder::new()
                    .root("ch")
                    .extra("../shared/labs")
                    .extra("./notes/../notes")
                    .lecture("Intro", "intro.md")
                    .build(),
            )
            .build();
        let paths = ResolvedPaths::resolve(&cfg, dir.path());
        let mut renderer = FakeRenderer::new(1);

        let course =
            build_course(&cfg, &paths, OutputKind::Pdf, &mut renderer, DEFAULT_INDEX_CSS).await?;

        let artifacts = course.artifacts.expect("pdf mode packages material");
        assert_eq!(
            entry_names(&artifacts.course_archive)?,
            vec!["C.pdf", "Ch/labs/a.txt", "Ch/notes/b.txt"]
        );

        Ok(())
    })
    .await
}

#[tokio::test]
async fn html_mode_renders_without_packaging() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = course_in(dir.path());
        let paths = ResolvedPaths::resolve(&cfg, dir.path());
        let mut renderer = FakeRenderer::new(1);

        let course =
            build_course(&cfg, &paths, OutputKind::Html, &mut renderer, "h1 { color: red; }")
                .await?;

        assert!(course.artifacts.is_none());
        assert!(dir.path().join("out/Basics/000-intro.html").is_file());
        assert!(!paths.course_slides.exists());
        assert!(!paths.course_archive.exists());
        assert!(fs::read_to_string(&course.index)?.contains("h1 { color: red; }"));

        Ok(())
    })
    .await
}

#[tokio::test]
async fn watermark_is_drawn_on_every_page() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        write_pdf(&dir.path().join("stamp.pdf"), 1)?;
        let mut cfg = course_in(dir.path());
        cfg.watermark = Some("stamp.pdf".into());
        let paths = ResolvedPaths::resolve(&cfg, dir.path());
        let mut renderer = FakeRenderer::new(1);

        let course =
            build_course(&cfg, &paths, OutputKind::Pdf, &mut renderer, DEFAULT_INDEX_CSS).await?;
        let deck = course.artifacts.expect("packaged").course_slides;

        assert_eq!(page_count(&deck), 3);
        let needle = format!("/{WATERMARK_XOBJECT} Do");
        for content in page_contents(&deck) {
            assert!(content.contains(&needle), "page without watermark: {content}");
            assert!(content.contains("Tj"), "page lost its own content");
        }
        assert!(!deck.with_extension("watermarked.pdf").exists());

        Ok(())
    })
    .await
}

#[test]
fn merged_pages_keep_input_order_and_count() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let inputs = [
        dir.path().join("a.pdf"),
        dir.path().join("b.pdf"),
        dir.path().join("c.pdf"),
    ];
    write_pdf(&inputs[0], 1)?;
    write_pdf(&inputs[1], 3)?;
    write_pdf(&inputs[2], 2)?;

    let output = dir.path().join("nested/merged.pdf");
    let stats = merge_pdfs(&inputs, &output)?;

    assert_eq!(stats.documents, 3);
    assert_eq!(stats.pages, 6);
    assert_eq!(page_count(&output), 6);

    let contents = page_contents(&output);
    let labels: Vec<bool> = contents
        .iter()
        .zip(["Page 1", "Page 1", "Page 2", "Page 3", "Page 1", "Page 2"])
        .map(|(content, label)| content.contains(label))
        .collect();
    assert!(labels.iter().all(|ok| *ok), "unexpected page order: {contents:?}");

    // Inherited attributes survive re-parenting.
    let doc = Document::load(&output)?;
    for page_id in doc.get_pages().into_values() {
        let page = doc.get_dictionary(page_id)?;
        assert!(page.has(b"MediaBox"));
        assert!(page.has(b"Resources"));
    }
    Ok(())
}

#[test]
fn larger_watermark_expands_the_page_box() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let deck = dir.path().join("deck.pdf");
    let stamp = dir.path().join("stamp.pdf");
    write_pdf(&deck, 3)?;
    write_pdf_with_box(&stamp, 1, [0, 0, 900, 500])?;

    let stamped = stamp_watermark(&deck, &stamp)?;
    assert_eq!(stamped, 3);
    assert_eq!(page_count(&deck), 3);

    let doc = Document::load(&deck)?;
    for page_id in doc.get_pages().into_values() {
        let media_box = eely::package::pdf::media_box(&doc, page_id);
        assert_eq!(media_box, [0.0, 0.0, 900.0, 792.0]);
    }
    Ok(())
}

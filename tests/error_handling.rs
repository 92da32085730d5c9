// tests/error_handling.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::io::Write;
use std::path::Path;

use eely::build_course;
use eely::config::{ResolvedPaths, load_and_validate};
use eely::errors::EelyError;
use eely::index::DEFAULT_INDEX_CSS;
use eely::types::OutputKind;
use eely_test_utils::builders::{ChapterBuilder, ConfigFileBuilder};
use eely_test_utils::fake_renderer::FakeRenderer;
use eely_test_utils::touch;
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn Error>>;

fn config_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{yaml}").unwrap();
    file
}

#[test]
fn test_missing_title_returns_config_error() {
    let file = config_file(
        r#"
chapters:
  Intro:
    lectures:
      Hello: hello.md
"#,
    );

    match load_and_validate(file.path()) {
        Err(EelyError::ConfigError(msg)) => assert!(msg.contains("title")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_missing_chapters_returns_config_error() {
    let file = config_file("title: Course\n");

    match load_and_validate(file.path()) {
        Err(EelyError::ConfigError(msg)) => assert!(msg.contains("chapters")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_malformed_yaml_returns_yaml_error() {
    let file = config_file("title: [unclosed\n");
    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(EelyError::YamlError(_))));
}

#[test]
fn test_wrong_typed_keys_return_config_error() {
    for (yaml, key) in [
        ("title: Course\nchapters: 5\n", "chapters"),
        ("title: [a, b]\nchapters:\n  A:\n    lectures: {}\n", "title"),
        ("title: Course\nchapters:\n  A:\n    lectures: [a.md]\n", "lectures"),
    ] {
        let file = config_file(yaml);
        match load_and_validate(file.path()) {
            Err(EelyError::ConfigError(msg)) => assert!(msg.contains(key), "{msg}"),
            Err(e) => panic!("Expected ConfigError for {key}, got: {:?}", e),
            Ok(_) => panic!("Expected error for {key}, got Ok"),
        }
    }
}

#[test]
fn test_empty_config_reports_missing_title() {
    let file = config_file("");
    match load_and_validate(file.path()) {
        Err(EelyError::ConfigError(msg)) => assert!(msg.contains("title")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_missing_config_file_is_reported() {
    let result = load_and_validate(Path::new("/definitely/not/here/course.yaml"));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("reading config file"));
}

#[tokio::test]
async fn missing_lecture_aborts_the_build() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        touch(&dir.path().join("intro.md"), "# Intro");
        let cfg = ConfigFileBuilder::new("Course")
            .output("out")
            .with_chapter(
                "Intro",
                ChapterBuilder::new()
                    .lecture("Intro", "intro.md")
                    .lecture("Gone", "gone.md")
                    .build(),
            )
            .build();
        let paths = ResolvedPaths::resolve(&cfg, dir.path());
        let mut renderer = FakeRenderer::new(1);

        let result =
            build_course(&cfg, &paths, OutputKind::Link, &mut renderer, DEFAULT_INDEX_CSS).await;

        match result {
            Err(EelyError::MissingSource { kind, path }) => {
                assert_eq!(kind, "Lecture");
                assert_eq!(path, dir.path().join("gone.md"));
            }
            other => panic!("Expected MissingSource, got: {:?}", other.map(|_| ())),
        }
        assert_eq!(renderer.calls().len(), 1);
        assert!(!dir.path().join("out/index.html").exists());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_asset_directory_and_extra_are_reported() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        touch(&dir.path().join("intro.md"), "# Intro");
        let paths_for = |cfg: &eely::config::ConfigFile| ResolvedPaths::resolve(cfg, dir.path());

        let cfg = ConfigFileBuilder::new("Course")
            .with_chapter(
                "Intro",
                ChapterBuilder::new()
                    .assets("resources")
                    .lecture("Intro", "intro.md")
                    .build(),
            )
            .build();
        let err = build_course(
            &cfg,
            &paths_for(&cfg),
            OutputKind::Link,
            &mut FakeRenderer::new(1),
            "",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EelyError::MissingSource { kind: "Asset directory", .. }));

        let cfg = ConfigFileBuilder::new("Course")
            .with_chapter(
                "Intro",
                ChapterBuilder::new()
                    .extra("labs")
                    .lecture("Intro", "intro.md")
                    .build(),
            )
            .build();
        let err = build_course(
            &cfg,
            &paths_for(&cfg),
            OutputKind::Link,
            &mut FakeRenderer::new(1),
            "",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EelyError::MissingSource { kind: "Extra file", .. }));

        Ok(())
    })
    .await
}

#[tokio::test]
async fn renderer_failure_stops_at_the_failing_lecture() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        for name in ["a.md", "b.md", "c.md"] {
            touch(&dir.path().join(name), "# slide");
        }
        let cfg = ConfigFileBuilder::new("Course")
            .with_chapter(
                "Only",
                ChapterBuilder::new()
                    .lecture("A", "a.md")
                    .lecture("B", "b.md")
                    .lecture("C", "c.md")
                    .build(),
            )
            .build();
        let paths = ResolvedPaths::resolve(&cfg, dir.path());
        let mut renderer = FakeRenderer::new(1).failing_on("b.md", 7);

        let err = build_course(&cfg, &paths, OutputKind::Pdf, &mut renderer, "")
            .await
            .unwrap_err();

        assert!(matches!(err, EelyError::RenderError { code: Some(7), .. }));
        assert_eq!(renderer.calls().len(), 2);
        assert!(!paths.course_slides.exists());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_watermark_fails_before_merging() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        touch(&dir.path().join("a.md"), "# slide");
        let cfg = ConfigFileBuilder::new("Course")
            .watermark("stamp.pdf")
            .with_chapter("Only", ChapterBuilder::new().lecture("A", "a.md").build())
            .build();
        let paths = ResolvedPaths::resolve(&cfg, dir.path());

        let err = build_course(&cfg, &paths, OutputKind::Pdf, &mut FakeRenderer::new(1), "")
            .await
            .unwrap_err();

        match err {
            EelyError::MissingSource { kind, path } => {
                assert_eq!(kind, "Watermark");
                assert_eq!(path, dir.path().join("stamp.pdf"));
            }
            other => panic!("Expected MissingSource, got: {:?}", other),
        }
        assert!(!paths.course_slides.exists());

        Ok(())
    })
    .await
}

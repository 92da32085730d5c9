//! Tiny PDFs for packaging tests.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Letter-sized, like a default renderer page.
pub const PAGE_BOX: [i64; 4] = [0, 0, 612, 792];

/// Write a PDF with `pages` pages to `path`.
///
/// `MediaBox` and `Resources` sit on the `Pages` node and are inherited,
/// which is what the merger and the stamper have to cope with.
pub fn write_pdf(path: &Path, pages: usize) -> anyhow::Result<()> {
    write_pdf_with_box(path, pages, PAGE_BOX)
}

pub fn write_pdf_with_box(path: &Path, pages: usize, media_box: [i64; 4]) -> anyhow::Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages);
    for n in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {}", n + 1))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => media_box.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    doc.save(path)?;
    Ok(())
}

pub fn page_count(path: &Path) -> usize {
    Document::load(path)
        .expect("test PDF should load")
        .get_pages()
        .len()
}

/// Concatenated content streams of every page, decompressed.
pub fn page_contents(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("test PDF should load");
    doc.get_pages()
        .into_values()
        .map(|id| {
            let bytes = doc.get_page_content(id).expect("page content");
            String::from_utf8_lossy(&bytes).into_owned()
        })
        .collect()
}

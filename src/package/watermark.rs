// src/package/watermark.rs

//! Watermark stamper.
//!
//! The first page of the watermark PDF is turned into a Form XObject and
//! drawn on top of every page of the deck. On top, not underneath: slides
//! usually have an opaque background that would hide it. A watermark meant
//! to look faint must carry its own transparency.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, info};

use crate::errors::{EelyError, Result};
use crate::package::pdf::{
    self, inherited_attribute, materialize_inherited, media_box, page_dict_mut, pdf_internal,
    rect_object, resolve, resolve_dict,
};

/// Resource name the watermark is registered under on every page.
pub const WATERMARK_XOBJECT: &str = "EelyWatermark";

/// Stamp `watermark` onto every page of `deck`, in place.
///
/// The result is written next to the deck first and then renamed over it,
/// so an interrupted run never leaves a half-written deck behind. Returns
/// the number of stamped pages.
pub fn stamp_watermark(deck: &Path, watermark: &Path) -> Result<usize> {
    let mut doc = pdf::load(deck)?;
    let mut mark = pdf::load(watermark)?;

    mark.renumber_objects_with(doc.max_id + 1);
    let mark_page = mark
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| {
            EelyError::ConfigError(format!("watermark {} has no pages", watermark.display()))
        })?;

    let content = mark
        .get_page_content(mark_page)
        .map_err(EelyError::pdf(watermark))?;
    let bbox = media_box(&mark, mark_page);
    let resources = {
        let page = mark
            .get_dictionary(mark_page)
            .map_err(EelyError::pdf(watermark))?;
        page.get(b"Resources")
            .ok()
            .cloned()
            .or_else(|| inherited_attribute(&mark, page, b"Resources"))
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()))
    };

    doc.max_id = mark.max_id;
    doc.objects.extend(mark.objects);

    let form_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => rect_object(bbox),
            "Resources" => resources,
        },
        content,
    ));

    // Shared by every page: save the page's graphics state up front, then
    // restore it and draw the watermark with an untouched CTM.
    let prologue_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let epilogue_id = doc.add_object(Stream::new(
        Dictionary::new(),
        format!("Q\nq\n/{WATERMARK_XOBJECT} Do\nQ\n").into_bytes(),
    ));

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for &page_id in &page_ids {
        stamp_page(&mut doc, page_id, form_id, prologue_id, epilogue_id, bbox)?;
    }

    doc.prune_objects();
    doc.compress();

    let staged = staged_path(deck);
    pdf::save(&mut doc, &staged)?;
    fs::rename(&staged, deck)
        .with_context(|| format!("replacing {} with {}", deck.display(), staged.display()))?;

    info!(
        deck = %deck.display(),
        watermark = %watermark.display(),
        pages = page_ids.len(),
        "watermark applied"
    );

    Ok(page_ids.len())
}

/// `<deck stem>.watermarked.pdf` next to the deck.
fn staged_path(deck: &Path) -> PathBuf {
    deck.with_extension("watermarked.pdf")
}

fn stamp_page(
    doc: &mut Document,
    page_id: ObjectId,
    form_id: ObjectId,
    prologue_id: ObjectId,
    epilogue_id: ObjectId,
    watermark_box: [f32; 4],
) -> Result<()> {
    materialize_inherited(doc, page_id)?;

    let page_box = media_box(doc, page_id);
    let expanded = union(page_box, watermark_box);

    let (resources, contents) = {
        let page = doc.get_dictionary(page_id).map_err(pdf_internal)?;

        // Rebuilt inline per page, so a resource dictionary shared between
        // pages is never modified behind another page's back.
        let mut resources = resolve_dict(doc, page.get(b"Resources").ok());
        let mut xobjects = resolve_dict(doc, resources.get(b"XObject").ok());
        xobjects.set(WATERMARK_XOBJECT, form_id);
        resources.set("XObject", xobjects);

        let mut contents = vec![Object::Reference(prologue_id)];
        contents.extend(existing_contents(doc, page.get(b"Contents").ok()));
        contents.push(Object::Reference(epilogue_id));

        (resources, contents)
    };

    let page = page_dict_mut(doc, page_id)?;
    page.set("Resources", resources);
    page.set("Contents", contents);
    if expanded != page_box {
        debug!(?page_id, ?page_box, ?expanded, "expanding page box");
        page.set("MediaBox", rect_object(expanded));
    }

    Ok(())
}

/// Content stream references of a page, flattening an indirect array.
fn existing_contents(doc: &Document, contents: Option<&Object>) -> Vec<Object> {
    let Some(contents) = contents else {
        return Vec::new();
    };
    match contents {
        Object::Array(items) => items.clone(),
        Object::Reference(_) => match resolve(doc, contents) {
            Object::Array(items) => items.clone(),
            _ => vec![contents.clone()],
        },
        _ => Vec::new(),
    }
}

fn union(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]
}

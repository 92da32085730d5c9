// src/package/pdf.rs

//! Small `lopdf` helpers shared by the merger and the watermark stamper.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, anyhow};
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::errors::{EelyError, Result};

/// Page attributes a page may inherit from its `Pages` ancestors.
pub const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// US Letter, the PDF default when no `MediaBox` is found at all.
pub const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Guards against `Parent` cycles in broken files.
const MAX_TREE_DEPTH: usize = 64;

pub fn load(path: &Path) -> Result<Document> {
    Document::load(path).map_err(EelyError::pdf(path))
}

/// Save `doc` to `path`, creating the parent directory.
pub fn save(doc: &mut Document, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    doc.save_to(&mut writer)
        .map_err(|e| anyhow!("writing {}: {e}", path.display()))?;
    Ok(())
}

/// Look `key` up on the page's ancestors, nearest first.
pub fn inherited_attribute(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(id) = parent {
        let Ok(node) = doc.get_dictionary(id) else {
            break;
        };
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            break;
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// Copy inherited attributes onto the page itself.
///
/// Needed before a page is moved under a different `Pages` node, otherwise
/// it would lose its size and fonts.
pub fn materialize_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut missing = Vec::new();
    {
        let page = doc.get_dictionary(page_id).map_err(pdf_internal)?;
        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(doc, page, key) {
                missing.push((key, value));
            }
        }
    }

    if !missing.is_empty() {
        let page = page_dict_mut(doc, page_id)?;
        for (key, value) in missing {
            page.set(key, value);
        }
    }
    Ok(())
}

pub fn page_dict_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary> {
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(pdf_internal)
}

/// Follow one level of indirection.
pub fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// Dictionary value of `object`, resolving a reference; empty otherwise.
pub fn resolve_dict(doc: &Document, object: Option<&Object>) -> Dictionary {
    match object.map(|o| resolve(doc, o)) {
        Some(Object::Dictionary(dict)) => dict.clone(),
        _ => Dictionary::new(),
    }
}

/// A page box as `[llx, lly, urx, ury]`, normalized.
pub fn rect(doc: &Document, object: &Object) -> Option<[f32; 4]> {
    let Object::Array(items) = resolve(doc, object) else {
        return None;
    };
    if items.len() != 4 {
        return None;
    }
    let mut values = [0.0_f32; 4];
    for (slot, item) in values.iter_mut().zip(items) {
        *slot = number(resolve(doc, item))?;
    }
    Some([
        values[0].min(values[2]),
        values[1].min(values[3]),
        values[0].max(values[2]),
        values[1].max(values[3]),
    ])
}

/// Effective `MediaBox` of a page, inherited or default.
pub fn media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return DEFAULT_MEDIA_BOX;
    };
    let own = page.get(b"MediaBox").ok().cloned();
    own.or_else(|| inherited_attribute(doc, page, b"MediaBox"))
        .and_then(|b| rect(doc, &b))
        .unwrap_or(DEFAULT_MEDIA_BOX)
}

pub fn rect_object(r: [f32; 4]) -> Object {
    Object::Array(r.iter().map(|v| Object::Real(*v)).collect())
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Structural problem inside a document we already loaded.
pub(crate) fn pdf_internal(err: lopdf::Error) -> EelyError {
    EelyError::Other(anyhow!("malformed PDF structure: {err}"))
}

// src/package/merge.rs

//! Slide merger: every page of every lecture PDF, in table-of-contents order.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, dictionary};
use tracing::{debug, info};

use crate::errors::Result;
use crate::package::pdf::{self, materialize_inherited, page_dict_mut};
use crate::tree::TableOfContents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub documents: usize,
    pub pages: usize,
}

/// Merge all lecture PDFs of `toc` into `output`.
pub fn merge_course_slides(toc: &TableOfContents, output: &Path) -> Result<MergeStats> {
    let inputs: Vec<PathBuf> = toc.lecture_paths().map(Path::to_path_buf).collect();
    merge_pdfs(&inputs, output)
}

/// Concatenate `inputs` into a single PDF at `output`.
///
/// No page selection and no deduplication: the result has exactly the sum
/// of the input page counts, in input order.
pub fn merge_pdfs<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<MergeStats> {
    let mut merged = Document::with_version("1.5");
    let pages_id = merged.new_object_id();
    let mut kids: Vec<Object> = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let mut doc = pdf::load(input)?;

        doc.renumber_objects_with(merged.max_id + 1);
        merged.max_id = doc.max_id;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &page_ids {
            materialize_inherited(&mut doc, page_id)?;
            page_dict_mut(&mut doc, page_id)?.set("Parent", pages_id);
        }

        debug!(input = %input.display(), pages = page_ids.len(), "appending document");

        kids.extend(page_ids.into_iter().map(Object::Reference));
        // The source catalog and page tree come along but end up
        // unreachable; `prune_objects` drops them below.
        merged.objects.extend(doc.objects);
    }

    let page_count = kids.len();
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);

    merged.prune_objects();
    merged.renumber_objects();
    merged.compress();
    pdf::save(&mut merged, output)?;

    info!(
        output = %output.display(),
        documents = inputs.len(),
        pages = page_count,
        "merged course slides"
    );

    Ok(MergeStats {
        documents: inputs.len(),
        pages: page_count,
    })
}

//! PDF outline (bookmark) injection for rendered pitch decks.
//!
//! Rendering and outline injection are separate passes: the renderer emits
//! finished PDF bytes, and this module reopens them with `lopdf` to attach an
//! `/Outlines` tree with one entry per slide plus the closing insights page.
//! Enabled with the `bookmarks` feature.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::content::PitchDeckContent;
use crate::sanitize::sanitize_text;

/// Errors that can occur while embedding an outline into a rendered PDF.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// The PDF bytes could not be parsed or rewritten by `lopdf`.
    #[error("failed to process PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    /// The document trailer has no usable catalog entry.
    #[error("PDF catalog entry is missing or not a dictionary")]
    MissingCatalog,
    /// An outline entry targets a page the document does not contain.
    #[error("outline entry `{title}` refers to missing page {page_number}")]
    MissingPage {
        /// Title of the offending entry.
        title: String,
        /// The requested 1-indexed page number.
        page_number: usize,
    },
}

impl From<std::io::Error> for OutlineError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

/// Attaches a flat outline to rendered pitch-deck bytes.
///
/// Slide `k` maps to page `k + 1` (the title page is page 1) and a final
/// "Market Insights" entry maps to the closing page.
pub fn apply_slide_outlines(
    pdf_bytes: &[u8],
    content: &PitchDeckContent,
) -> Result<Vec<u8>, OutlineError> {
    let mut document = Document::load_mem(pdf_bytes)?;

    let pages = document.get_pages();
    let mut entries = collect_entries(&mut document, content, &pages)?;
    let outlines_id = document.new_object_id();
    link_entries(outlines_id, &mut document, &mut entries);
    insert_outlines_root(outlines_id, &mut document, &entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
}

fn collect_entries(
    document: &mut Document,
    content: &PitchDeckContent,
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, OutlineError> {
    let slide_titles = content
        .slides
        .iter()
        .map(|slide| sanitize_text(&slide.title));
    let titles: Vec<String> = slide_titles.chain(["Market Insights".to_string()]).collect();

    let mut entries = Vec::with_capacity(titles.len());
    for (index, title) in titles.into_iter().enumerate() {
        // Page 1 is the title page; content pages follow in order.
        let page_number = index + 2;
        let page_ref =
            pages
                .get(&(page_number as u32))
                .copied()
                .ok_or_else(|| OutlineError::MissingPage {
                    title: title.clone(),
                    page_number,
                })?;

        entries.push(OutlineEntry {
            object_id: document.new_object_id(),
            page_ref,
            title,
        });
    }

    Ok(entries)
}

fn link_entries(outlines_id: ObjectId, document: &mut Document, entries: &mut [OutlineEntry]) {
    for index in 0..entries.len() {
        let mut dictionary = Dictionary::new();
        dictionary.set(
            "Title",
            Object::string_literal(entries[index].title.as_str()),
        );
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entries[index].page_ref),
                Object::Name("Fit".into()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));

        if index > 0 {
            dictionary.set("Prev", Object::Reference(entries[index - 1].object_id));
        }
        if index + 1 < entries.len() {
            dictionary.set("Next", Object::Reference(entries[index + 1].object_id));
        }

        document
            .objects
            .insert(entries[index].object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &[OutlineEntry],
) -> Result<(), OutlineError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| OutlineError::MissingCatalog)?;

    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name("Outlines".into()));
    dictionary.set("Count", Object::Integer(entries.len() as i64));
    if let Some(first) = entries.first() {
        dictionary.set("First", Object::Reference(first.object_id));
    }
    if let Some(last) = entries.last() {
        dictionary.set("Last", Object::Reference(last.object_id));
    }

    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(OutlineError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| OutlineError::MissingCatalog)?;

    catalog.set("Outlines", Object::Reference(outlines_id));

    Ok(())
}

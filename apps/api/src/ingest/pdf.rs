//! PDF text extraction, one page at a time.
//!
//! A page that fails to extract contributes nothing and is logged; the rest
//! of the document is still returned. A document that cannot be loaded at
//! all is an error.

use std::fmt::Display;
use std::io::{Read, Seek};

use lopdf::Document;
use tracing::warn;

use super::IngestError;

pub fn extract<R: Read + Seek>(source: &mut R) -> Result<String, IngestError> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;

    let doc = Document::load_mem(&bytes)?;
    let pages = doc
        .get_pages()
        .into_keys()
        .map(|page_no| (page_no, doc.extract_text(&[page_no])));

    Ok(join_pages(pages))
}

/// Concatenates page texts in page order, skipping pages that failed.
pub fn join_pages<I, E>(pages: I) -> String
where
    I: IntoIterator<Item = (u32, Result<String, E>)>,
    E: Display,
{
    let mut text = String::new();
    for (page_no, result) in pages {
        match result {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!(page = page_no, error = %e, "Skipping PDF page that failed to extract"),
        }
    }
    text
}

//! Ingestion adapter. Turns an uploaded PDF or DOCX into plain text.
//!
//! Leaf component: no dependency on sessions or prompts. Callers treat an
//! empty result as a failed extraction.

use std::io::{Read, Seek};

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub mod docx;
pub mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX XML error: {0}")]
    Xml(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            PDF_MIME => Some(DocumentKind::Pdf),
            DOCX_MIME => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// An uploaded document. Lives only for the request that carried it.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }

    /// Declared content type first; browsers often send
    /// `application/octet-stream`, so the file extension is the fallback.
    pub fn kind(&self) -> Option<DocumentKind> {
        self.content_type
            .as_deref()
            .and_then(DocumentKind::from_content_type)
            .or_else(|| DocumentKind::from_file_name(&self.name))
    }
}

/// Extracts plain text from `source`.
///
/// The read position is rewound to the start afterwards, whether or not
/// extraction succeeded, so the handle can be reused.
pub fn extract_text<R: Read + Seek>(source: &mut R, kind: DocumentKind) -> Result<String, IngestError> {
    let result = match kind {
        DocumentKind::Pdf => pdf::extract(source),
        DocumentKind::Docx => docx::extract(source),
    };
    let rewound = source.rewind();
    let text = result?;
    rewound?;
    Ok(text)
}

// file: src/parser/pdf.rs
// description: per-page PDF text extraction backed by lopdf
// reference: https://docs.rs/lopdf

use crate::error::{PipelineError, Result};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn open(&self, path: &Path) -> Result<PdfDocument> {
        let document = Document::load(path).map_err(|e| {
            PipelineError::document_format(format!(
                "{} is not a readable PDF: {}",
                path.display(),
                e
            ))
        })?;

        Ok(PdfDocument::from_document(document))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed PDF whose pages are addressed 0-based in document order.
pub struct PdfDocument {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    fn from_document(document: Document) -> Self {
        // get_pages is keyed by 1-based page number and already ordered
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!("Loaded PDF with {} pages", page_numbers.len());

        Self {
            document,
            page_numbers,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    pub fn page_text(&self, index: usize) -> Result<String> {
        let page_number = *self.page_numbers.get(index).ok_or_else(|| {
            PipelineError::document_format(format!(
                "page index {} out of range (document has {} pages)",
                index,
                self.page_numbers.len()
            ))
        })?;

        self.document.extract_text(&[page_number]).map_err(|e| {
            PipelineError::document_format(format!(
                "failed to extract text from page {}: {}",
                page_number, e
            ))
        })
    }
}

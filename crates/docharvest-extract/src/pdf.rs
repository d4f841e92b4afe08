//! PDF extractor
//!
//! Extracts the native text layer page by page. Pages with no extractable
//! text get a placeholder marker instead of being rasterized and OCR'd;
//! scanned-only PDFs therefore produce placeholders, not recovered text.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};

/// Marker emitted for pages whose text layer is empty.
const EMPTY_PAGE_MARKER: &str = "[no extractable text]";

/// PDF text-layer extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for PdfExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Pdf
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let pdf = lopdf::Document::load_mem(&doc.bytes)
            .map_err(|e| ExtractError::ParseFailure(format!("could not open PDF: {e}")))?;

        let pages = pdf.get_pages();
        let mut sections = Vec::with_capacity(pages.len());

        for &page_number in pages.keys() {
            let text = pdf.extract_text(&[page_number]).unwrap_or_default();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                log::info!(
                    "no text found on page {page_number} of {}, emitting placeholder",
                    doc.name
                );
                sections.push(format!("Page {page_number}: {EMPTY_PAGE_MARKER}"));
            } else {
                sections.push(format!("Page {page_number}:\n{trimmed}"));
            }
        }

        let mut result = ExtractionResult::with_content(sections.join("\n\n"));
        result.set_meta("total_pages", pages.len());
        Ok(result)
    }
}

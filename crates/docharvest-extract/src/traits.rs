//! Extractor trait and shared options

use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};

/// Options threaded through every extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Tesseract language code used by the OCR stack
    pub ocr_language: String,

    /// Run OCR over images embedded in word-processor documents
    pub embedded_image_ocr: bool,
}

impl ExtractOptions {
    /// Set the OCR language.
    #[must_use = "returns options with the OCR language configured"]
    pub fn with_ocr_language(mut self, language: impl Into<String>) -> Self {
        self.ocr_language = language.into();
        self
    }

    /// Enable or disable OCR for embedded images.
    #[must_use = "returns options with embedded-image OCR configured"]
    pub fn with_embedded_image_ocr(mut self, enable: bool) -> Self {
        self.embedded_image_ocr = enable;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            ocr_language: "eng".to_string(),
            embedded_image_ocr: true,
        }
    }
}

/// One per-format content extractor
///
/// Implementations are registered with the dispatcher for the format they
/// return from [`Extractor::kind`]. Extractors return `Err` freely; the
/// dispatcher converts errors into `error`-bearing results at its boundary.
pub trait Extractor: Send + Sync {
    /// The format this extractor is registered for.
    fn kind(&self) -> FileKind;

    /// Extract content from a document of this extractor's format.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when the document cannot be parsed or
    /// recognized.
    fn extract(
        &self,
        doc: &Document,
        options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError>;
}

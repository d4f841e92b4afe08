//! Image extractor: preprocessing plus multi-configuration OCR
//!
//! Decodes the raw image, runs the deterministic preprocessing pipeline,
//! then the full five-configuration OCR sweep with confidence-scored
//! selection. The winning text (post-normalization) becomes the content.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};
use docharvest_ocr::{preprocess, OcrEngine};
use image::GenericImageView;

/// OCR-backed extractor for raster images
///
/// One instance per registered image format; PNG and JPEG share the
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageExtractor {
    kind: FileKind,
}

impl ImageExtractor {
    /// Create an extractor registered for the given image format.
    #[must_use]
    pub const fn new(kind: FileKind) -> Self {
        Self { kind }
    }
}

impl Extractor for ImageExtractor {
    fn kind(&self) -> FileKind {
        self.kind
    }

    fn extract(
        &self,
        doc: &Document,
        options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let decoded = image::load_from_memory(&doc.bytes)
            .map_err(|e| ExtractError::ParseFailure(format!("could not load image: {e}")))?;
        let (width, height) = decoded.dimensions();

        let binary = preprocess(&decoded);

        let engine = OcrEngine::new(&options.ocr_language);
        let selection = engine
            .recognize(&binary)
            .map_err(|e| ExtractError::OcrFailure(e.to_string()))?;

        let mut result = ExtractionResult::with_content(selection.text);
        result.set_meta("image_size", vec![width, height]);
        result.set_meta("ocr_confidence", f64::from(selection.confidence));
        result.set_meta("ocr_method", "multi-config");
        Ok(result)
    }
}

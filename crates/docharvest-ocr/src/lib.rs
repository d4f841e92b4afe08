//! OCR support for docharvest
//!
//! This crate turns raw document images into cleaned text in three stages:
//!
//! 1. **Preprocessing** ([`preprocess`]): a deterministic pipeline that
//!    normalizes a raw image into an OCR-ready binary image (grayscale,
//!    conditional cubic upscale, Gaussian denoise, CLAHE contrast
//!    normalization, morphological closing, Otsu binarization).
//! 2. **Recognition** ([`OcrEngine`]): a fixed sweep of five Tesseract page
//!    segmentation configurations with confidence-scored selection of the
//!    best attempt.
//! 3. **Cleanup** ([`TextNormalizer`]): literal corrections for recurring
//!    misreads of banking-domain terms plus whitespace normalization.
//!
//! # Backend
//!
//! Recognition uses Tesseract via `leptess`. Any OCR backend supporting the
//! five page-segmentation semantics could substitute; the engine only relies
//! on token-level confidences and whole-image text output.

pub mod engine;
pub mod normalize;
pub mod preprocess;

pub use engine::{OcrAttempt, OcrEngine, OcrError, OcrSelection};
pub use normalize::TextNormalizer;
pub use preprocess::{preprocess, MIN_OCR_DIMENSION};

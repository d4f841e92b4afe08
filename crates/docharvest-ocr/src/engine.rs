//! Multi-configuration Tesseract recognition with confidence selection
//!
//! The engine runs a fixed, ordered sweep of five page-segmentation
//! configurations over one preprocessed image and keeps the attempt whose
//! mean token confidence **and** text length both beat the current best.
//! The conjunctive rule is intentional and reproduced as observed in
//! production: it can retain a longer, lower-quality early result over a
//! more accurate but shorter later one.
//!
//! There is no wall-clock bound on an in-flight recognition pass; worst-case
//! latency on large or noisy images is five configurations times Tesseract's
//! own runtime.

use crate::normalize::TextNormalizer;
use image::GrayImage;
use leptess::{LepTess, Variable};
use serde::Serialize;
use thiserror::Error;

/// Fixed configuration sweep, in selection order. Page segmentation modes:
/// 6 = uniform block of text, 8 = single word, 7 = single text line,
/// 11 = sparse text, 13 = raw line. The engine mode stays on the default
/// LSTM engine throughout.
const OCR_CONFIGS: [OcrConfig; 5] = [
    OcrConfig { label: "psm-6-block", psm: 6 },
    OcrConfig { label: "psm-8-single-word", psm: 8 },
    OcrConfig { label: "psm-7-single-line", psm: 7 },
    OcrConfig { label: "psm-11-sparse-text", psm: 11 },
    OcrConfig { label: "psm-13-raw-line", psm: 13 },
];

/// Page segmentation mode used for embedded images, where only a single
/// recognition pass is run.
const EMBEDDED_PSM: u32 = 6;

/// One Tesseract configuration in the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcrConfig {
    /// Human-readable configuration label
    pub label: &'static str,
    /// Tesseract page segmentation mode
    pub psm: u32,
}

/// A single recognition attempt. Exists only during the selection loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrAttempt {
    /// Configuration that produced this attempt
    pub config: &'static str,
    /// Recognized text, trimmed
    pub text: String,
    /// Mean confidence across tokens with confidence > 0, in [0, 100]
    pub confidence: f32,
}

/// The selected best recognition output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrSelection {
    /// Cleaned text of the winning attempt
    pub text: String,
    /// Confidence of the winning attempt, in [0, 100]
    pub confidence: f32,
}

/// OCR engine errors
#[derive(Debug, Error)]
pub enum OcrError {
    /// Tesseract could not be initialized for the requested language.
    #[error("failed to initialize Tesseract for language {language:?}: {message}")]
    Init {
        /// Requested language code
        language: String,
        /// Initialization failure detail
        message: String,
    },

    /// A configuration variable could not be applied.
    #[error("failed to apply OCR configuration: {0}")]
    Configuration(String),

    /// The image could not be encoded or handed to the engine.
    #[error("failed to load image into OCR engine: {0}")]
    Image(String),

    /// Recognition output could not be retrieved.
    #[error("failed to read recognition output: {0}")]
    Recognition(String),

    /// Every configuration in the sweep failed.
    #[error("all OCR configurations failed")]
    AllConfigurationsFailed,
}

/// Tesseract-backed OCR engine
///
/// Stateless between calls; each recognition pass initializes a fresh
/// Tesseract handle, so the engine itself is cheap to construct and clone.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    language: String,
    normalizer: TextNormalizer,
}

impl OcrEngine {
    /// Create an engine for the given Tesseract language code (e.g. "eng").
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            normalizer: TextNormalizer::new(),
        }
    }

    /// Run the full configuration sweep and select the best attempt.
    ///
    /// Selection starts from empty text with confidence 0; a candidate
    /// replaces the current best only when its confidence is strictly
    /// greater and its text is strictly longer. The winning text is cleaned
    /// by the normalizer before being returned. Deterministic for identical
    /// input images.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::AllConfigurationsFailed`] when no configuration
    /// produced a result, or [`OcrError::Image`] when the input image could
    /// not be encoded at all.
    pub fn recognize(&self, image: &GrayImage) -> Result<OcrSelection, OcrError> {
        let png = encode_png(image)?;

        let mut best_text = String::new();
        let mut best_confidence = 0.0_f32;
        let mut any_succeeded = false;

        for config in &OCR_CONFIGS {
            match self.run_config(&png, config) {
                Ok(attempt) => {
                    any_succeeded = true;
                    if attempt.confidence > best_confidence
                        && attempt.text.len() > best_text.len()
                    {
                        best_text = attempt.text;
                        best_confidence = attempt.confidence;
                    }
                }
                Err(e) => {
                    log::warn!("OCR configuration {} failed: {e}", config.label);
                }
            }
        }

        if !any_succeeded {
            return Err(OcrError::AllConfigurationsFailed);
        }

        Ok(OcrSelection {
            text: self.normalizer.clean(&best_text),
            confidence: best_confidence,
        })
    }

    /// Single-pass recognition with the default mixed-layout configuration.
    ///
    /// Used for images embedded in documents, where the full sweep is not
    /// worth its cost. Returns trimmed raw text.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be initialized or the pass
    /// fails.
    pub fn recognize_single_pass(&self, image: &GrayImage) -> Result<String, OcrError> {
        let png = encode_png(image)?;
        let mut session = self.init_session(EMBEDDED_PSM)?;
        session
            .set_image_from_mem(&png)
            .map_err(|e| OcrError::Image(e.to_string()))?;
        let text = session
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        Ok(text.trim().to_string())
    }

    /// Run one configuration: token-level recognition for the confidence
    /// score, then whole-image recognition for the text.
    fn run_config(&self, png: &[u8], config: &OcrConfig) -> Result<OcrAttempt, OcrError> {
        let mut session = self.init_session(config.psm)?;
        session
            .set_image_from_mem(png)
            .map_err(|e| OcrError::Image(e.to_string()))?;

        let tsv = session
            .get_tsv_text(0)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        let confidence = mean_token_confidence(&tsv);

        let text = session
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        Ok(OcrAttempt {
            config: config.label,
            text: text.trim().to_string(),
            confidence,
        })
    }

    fn init_session(&self, psm: u32) -> Result<LepTess, OcrError> {
        let mut session = LepTess::new(None, &self.language).map_err(|e| OcrError::Init {
            language: self.language.clone(),
            message: e.to_string(),
        })?;
        session
            .set_variable(Variable::TesseditPagesegMode, &psm.to_string())
            .map_err(|e| OcrError::Configuration(e.to_string()))?;
        Ok(session)
    }
}

impl Default for OcrEngine {
    fn default() -> Self {
        Self::new("eng")
    }
}

/// Mean confidence across TSV tokens with confidence > 0.
///
/// Tesseract's TSV output carries the confidence in column 11; structural
/// rows (page, block, paragraph, line) carry -1 there and are excluded, not
/// treated as zero.
#[allow(clippy::cast_precision_loss)]
fn mean_token_confidence(tsv: &str) -> f32 {
    let mut sum = 0.0_f32;
    let mut count = 0u32;
    for line in tsv.lines() {
        if let Some(field) = line.split('\t').nth(10) {
            if let Ok(confidence) = field.trim().parse::<f32>() {
                if confidence > 0.0 {
                    sum += confidence;
                    count += 1;
                }
            }
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

fn encode_png(image: &GrayImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| OcrError::Image(format!("could not encode image: {e}")))?;
    Ok(buffer.into_inner())
}

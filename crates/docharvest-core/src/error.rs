//! Error taxonomy for extraction operations
//!
//! Every failure in the pipeline is folded into one of the kinds below and
//! carried inside the offending file's [`ExtractionResult`], so callers can
//! branch on the failure kind instead of inspecting message strings. A batch
//! is never aborted by a single bad file.
//!
//! [`ExtractionResult`]: crate::ExtractionResult

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Extraction failure kinds
///
/// The set is closed: extractors map their library errors into one of these
/// at the point of failure, and the dispatcher converts any escaping error
/// into an `error`-bearing result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ExtractError {
    /// No extractor is registered for the file's extension.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A format-specific decode or parse step failed.
    #[error("parse failure: {0}")]
    ParseFailure(String),

    /// Strict UTF-8 decoding failed and every fallback codepage was
    /// exhausted.
    #[error("encoding failure: no fallback codepage could decode the file")]
    EncodingFailure,

    /// Every OCR configuration failed or the engine could not run.
    #[error("OCR failure: {0}")]
    OcrFailure(String),

    /// The archive could not be opened or extracted.
    #[error("corrupt archive: {0}")]
    ArchiveCorrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ExtractError::UnsupportedFormat(".bin".to_string());
        assert_eq!(err.to_string(), "unsupported file format: .bin");

        let err = ExtractError::EncodingFailure;
        assert!(err.to_string().contains("fallback codepage"));
    }

    #[test]
    fn test_round_trips_through_serde() {
        let err = ExtractError::ParseFailure("bad header".to_string());
        let json = serde_json::to_string(&err).unwrap();
        let back: ExtractError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }

    #[test]
    fn test_kinds_are_distinguishable() {
        let a = ExtractError::OcrFailure("x".to_string());
        let b = ExtractError::ParseFailure("x".to_string());
        assert_ne!(a, b);
    }
}

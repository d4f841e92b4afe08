//! Document payloads and the uniform extraction record

use crate::error::ExtractError;
use crate::format::FileKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A file queued for extraction: name, format tag, and raw bytes.
///
/// Immutable once read. Archives are decomposed into child `Document`s by
/// the expander rather than extracted directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name, including extension
    pub name: String,
    /// Extension-derived format tag
    pub kind: FileKind,
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// Originating path, when the document was read from disk
    pub source_path: Option<PathBuf>,
}

impl Document {
    /// Create a document from in-memory bytes.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, kind: FileKind, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            bytes,
            source_path: None,
        }
    }

    /// Read a document from disk, deriving its format from the extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` when the extension has no registered
    /// format, and `ParseFailure` when the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let kind = FileKind::from_path(path).ok_or_else(|| {
            ExtractError::UnsupportedFormat(extension_label(path))
        })?;
        let bytes = std::fs::read(path)
            .map_err(|e| ExtractError::ParseFailure(format!("could not read file: {e}")))?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
        Ok(Self {
            name,
            kind,
            bytes,
            source_path: Some(path.to_path_buf()),
        })
    }
}

/// Lowercased extension of a path with a leading dot, or `"unknown"`.
#[must_use]
pub fn extension_label(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or_else(|| "unknown".to_string(), |e| format!(".{}", e.to_lowercase()))
}

/// Uniform per-file extraction record
///
/// `content` is always defined, even on failure. `error` is set if and only
/// if extraction could not produce meaningful content. Consumed exactly once
/// by the aggregator; errored entries are skipped in the corpus but stay
/// visible to the caller for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted text content, empty on failure
    pub content: String,
    /// Table rows rendered as pipe-joined cell strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
    /// OCR text recovered from embedded images, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_text: Vec<String>,
    /// Format-specific facts: page count, sheet names, encoding used, etc.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// Failure kind, when extraction produced no meaningful content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExtractError>,
}

impl ExtractionResult {
    /// Empty result with no content and no error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful result carrying extracted text.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Failed result: empty content, error set.
    #[must_use]
    pub fn failure(error: ExtractError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Record a format-specific metadata fact.
    pub fn set_meta(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.to_string(), value.into());
    }

    /// Whether this entry contributes text to the corpus.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Whether extraction failed for this file.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_content_defined() {
        let result = ExtractionResult::failure(ExtractError::EncodingFailure);
        assert_eq!(result.content, "");
        assert!(result.is_failed());
        assert!(!result.has_content());
    }

    #[test]
    fn test_with_content() {
        let result = ExtractionResult::with_content("hello");
        assert!(result.has_content());
        assert!(!result.is_failed());
        assert!(result.tables.is_empty());
        assert!(result.image_text.is_empty());
    }

    #[test]
    fn test_set_meta_accepts_heterogeneous_values() {
        let mut result = ExtractionResult::new();
        result.set_meta("total_pages", 3);
        result.set_meta("encoding_used", "latin-1");
        result.set_meta("sheet_names", vec!["Sheet1".to_string()]);

        assert_eq!(result.metadata["total_pages"], 3);
        assert_eq!(result.metadata["encoding_used"], "latin-1");
        assert!(result.metadata["sheet_names"].is_array());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let result = ExtractionResult::with_content("x");
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("tables"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_document_from_bytes() {
        let doc = Document::from_bytes("note.txt", FileKind::Txt, b"abc".to_vec());
        assert_eq!(doc.name, "note.txt");
        assert_eq!(doc.kind, FileKind::Txt);
        assert!(doc.source_path.is_none());
    }

    #[test]
    fn test_document_from_path_unregistered_extension() {
        let err = Document::from_path(Path::new("payload.bin")).unwrap_err();
        assert_eq!(err, ExtractError::UnsupportedFormat(".bin".to_string()));
    }

    #[test]
    fn test_extension_label() {
        assert_eq!(extension_label(Path::new("a/b/Report.PDF")), ".pdf");
        assert_eq!(extension_label(Path::new("no_extension")), "unknown");
    }
}

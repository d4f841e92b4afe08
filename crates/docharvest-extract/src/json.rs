//! JSON extractor
//!
//! Parses the document and re-serializes it with stable two-space
//! indentation, so equivalent inputs produce identical corpus text.
//! Top-level keys are recorded as metadata when the document is an object.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};

/// JSON data extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct JsonExtractor;

impl JsonExtractor {
    /// Create a new JSON extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for JsonExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Json
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let value: serde_json::Value = serde_json::from_slice(&doc.bytes)
            .map_err(|e| ExtractError::ParseFailure(format!("invalid JSON: {e}")))?;

        let content = serde_json::to_string_pretty(&value)
            .map_err(|e| ExtractError::ParseFailure(format!("could not render JSON: {e}")))?;

        let mut result = ExtractionResult::with_content(content);
        if let serde_json::Value::Object(map) = &value {
            let keys: Vec<String> = map.keys().cloned().collect();
            result.set_meta("keys", keys);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_pretty_rendering() {
        let doc = Document::from_bytes(
            "a.json",
            FileKind::Json,
            br#"{"amount":12.5,"currency":"EUR"}"#.to_vec(),
        );
        let result = JsonExtractor::new()
            .extract(&doc, &ExtractOptions::default())
            .unwrap();
        assert_eq!(
            result.content,
            "{\n  \"amount\": 12.5,\n  \"currency\": \"EUR\"\n}"
        );
        assert_eq!(result.metadata["keys"], serde_json::json!(["amount", "currency"]));
    }

    #[test]
    fn test_non_object_has_no_keys_metadata() {
        let doc = Document::from_bytes("a.json", FileKind::Json, b"[1, 2, 3]".to_vec());
        let result = JsonExtractor::new()
            .extract(&doc, &ExtractOptions::default())
            .unwrap();
        assert!(!result.metadata.contains_key("keys"));
    }

    #[test]
    fn test_invalid_json_is_parse_failure() {
        let doc = Document::from_bytes("a.json", FileKind::Json, b"{broken".to_vec());
        let err = JsonExtractor::new()
            .extract(&doc, &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExtractError::ParseFailure(_)));
    }
}

//! Plain text extractor with codepage fallback
//!
//! Strict UTF-8 first; on failure the legacy codepages are tried in a fixed
//! order and the first successful decode wins, with its name recorded in
//! metadata. Latin-1 maps every byte, so in practice the chain ends there,
//! but the full order is kept and `EncodingFailure` stays reachable in the
//! type system.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};

/// Fallback codepages, tried in order after strict UTF-8.
const FALLBACK_CODEPAGES: [&str; 3] = ["latin-1", "cp1252", "iso-8859-1"];

/// Plain text extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TxtExtractor;

impl TxtExtractor {
    /// Create a new text extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for TxtExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Txt
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        if let Ok(text) = std::str::from_utf8(&doc.bytes) {
            let mut result = ExtractionResult::with_content(text);
            result.set_meta("line_count", line_count(text));
            return Ok(result);
        }

        for codepage in FALLBACK_CODEPAGES {
            if let Some(text) = decode_codepage(codepage, &doc.bytes) {
                let mut result = ExtractionResult::new();
                result.set_meta("encoding_used", codepage);
                result.set_meta("line_count", line_count(&text));
                result.content = text;
                return Ok(result);
            }
        }

        Err(ExtractError::EncodingFailure)
    }
}

fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Decode with one named codepage, `None` when the codepage rejects the
/// bytes.
fn decode_codepage(codepage: &str, bytes: &[u8]) -> Option<String> {
    match codepage {
        // Direct byte-to-codepoint mapping; cannot fail
        "latin-1" | "iso-8859-1" => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        "cp1252" => {
            let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            if had_errors {
                None
            } else {
                Some(text.into_owned())
            }
        }
        _ => None,
    }
}

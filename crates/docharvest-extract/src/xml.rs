//! XML extractor
//!
//! Parses the document into a tree and extracts text-only content in
//! document order. The root tag name and total element count are recorded
//! as metadata.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};

/// XML data extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct XmlExtractor;

impl XmlExtractor {
    /// Create a new XML extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for XmlExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Xml
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let text = std::str::from_utf8(&doc.bytes)
            .map_err(|e| ExtractError::ParseFailure(format!("XML is not UTF-8: {e}")))?;

        let tree = roxmltree::Document::parse(text)
            .map_err(|e| ExtractError::ParseFailure(format!("invalid XML: {e}")))?;

        let content: String = tree
            .root()
            .descendants()
            .filter(|node| node.is_text())
            .filter_map(|node| node.text())
            .collect();

        let element_count = tree
            .root()
            .descendants()
            .filter(roxmltree::Node::is_element)
            .count();

        let mut result = ExtractionResult::with_content(content);
        result.set_meta("root_tag", tree.root_element().tag_name().name());
        result.set_meta("element_count", element_count);
        Ok(result)
    }
}

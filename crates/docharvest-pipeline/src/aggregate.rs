//! Corpus aggregation
//!
//! The aggregator merges an ordered list of per-file results into one
//! provenance-tagged text. Files contribute a header plus their content,
//! then a labeled block for table rows and another for embedded-image text
//! when present. Errored entries contribute nothing to the text but stay in
//! the entry list for reporting.

use docharvest_core::{ExtractError, ExtractionResult};
use serde::{Deserialize, Serialize};

/// Merges ordered extraction results into corpus text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentAggregator;

impl ContentAggregator {
    /// Combine per-file results into the corpus string.
    ///
    /// Input order is preserved; blocks are joined with a blank line.
    #[must_use]
    pub fn combine(entries: &[(String, ExtractionResult)]) -> String {
        let mut blocks = Vec::new();

        for (name, result) in entries {
            if result.has_content() {
                blocks.push(format!("\n--- Content from {name} ---\n{}", result.content));
            }
            if !result.tables.is_empty() {
                blocks.push(format!("\nTables:\n{}", result.tables.join("\n")));
            }
            if !result.image_text.is_empty() {
                blocks.push(format!("\nImage Text:\n{}", result.image_text.join("\n")));
            }
        }

        blocks.join("\n\n")
    }
}

/// One corpus entry: file identifier plus its extraction result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// File identifier as submitted
    pub name: String,
    /// The file's extraction result, errors included
    pub result: ExtractionResult,
}

/// The aggregated output of one batch
///
/// Built once per batch and read-only afterward: the ordered per-file
/// entries plus the concatenated corpus text handed to the downstream
/// generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
    text: String,
}

impl Corpus {
    /// Aggregate ordered results into a corpus.
    #[must_use]
    pub fn build(results: Vec<(String, ExtractionResult)>) -> Self {
        let text = ContentAggregator::combine(&results);
        let entries = results
            .into_iter()
            .map(|(name, result)| CorpusEntry { name, result })
            .collect();
        Self { entries, text }
    }

    /// The concatenated corpus text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ordered per-file entries, errored files included.
    #[must_use]
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Entries whose extraction failed, for error reporting.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ExtractError)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.result.error.as_ref().map(|e| (entry.name.as_str(), e)))
    }
}

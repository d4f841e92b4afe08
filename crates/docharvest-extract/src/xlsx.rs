//! XLSX (Microsoft Excel) extractor using calamine
//!
//! Every sheet is walked in workbook order; non-empty rows become
//! pipe-joined cell strings and all sheets concatenate into one content
//! block. Sheet names and counts land in metadata.

use crate::traits::{ExtractOptions, Extractor};
use calamine::{Data, Reader, Xlsx};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};
use std::io::Cursor;

/// Excel workbook extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct XlsxExtractor;

impl XlsxExtractor {
    /// Create a new XLSX extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for XlsxExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Xlsx
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let mut workbook = Xlsx::new(Cursor::new(doc.bytes.as_slice()))
            .map_err(|e| ExtractError::ParseFailure(format!("could not open workbook: {e}")))?;

        let sheet_names = workbook.sheet_names().to_owned();
        let mut lines = Vec::new();

        for name in &sheet_names {
            let range = workbook.worksheet_range(name).map_err(|e| {
                ExtractError::ParseFailure(format!("could not read sheet {name}: {e}"))
            })?;

            for row in range.rows() {
                if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                    continue;
                }
                let line = row
                    .iter()
                    .map(cell_text)
                    .collect::<Vec<_>>()
                    .join(" | ");
                lines.push(line);
            }
        }

        let mut result = ExtractionResult::with_content(lines.join("\n"));
        result.set_meta("sheet_names", sheet_names.clone());
        result.set_meta("total_sheets", sheet_names.len());
        Ok(result)
    }
}

/// Stringify one cell; empty cells become empty strings, not "None".
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

//! CSV extractor
//!
//! Parses rows with the csv crate (flexible column counts allowed) and
//! renders a fixed-width text table: per-column widths from the widest
//! cell, numeric columns right-aligned, everything else left-aligned. The
//! first row is treated as the header; column names and row/column counts
//! are recorded as metadata.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};
use std::fmt::Write;

/// CSV data extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CsvExtractor;

impl CsvExtractor {
    /// Create a new CSV extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for CsvExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Csv
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let rows = read_rows(&doc.bytes)?;
        let Some(header) = rows.first() else {
            return Err(ExtractError::ParseFailure("no columns to parse".to_string()));
        };

        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths = column_widths(&rows, num_cols);
        let numeric = numeric_columns(&rows, num_cols);

        let mut content = String::new();
        for (index, row) in rows.iter().enumerate() {
            write_row(&mut content, row, &widths, &numeric);
            if index + 1 < rows.len() {
                content.push('\n');
            }
        }

        let mut result = ExtractionResult::with_content(content);
        result.set_meta("columns", header.clone());
        result.set_meta("row_count", rows.len() - 1);
        result.set_meta("column_count", header.len());
        Ok(result)
    }
}

fn read_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(ToString::to_string).collect())
                .map_err(|e| ExtractError::ParseFailure(format!("could not read CSV record: {e}")))
        })
        .collect()
}

/// Width of each column: the widest cell, header included.
fn column_widths(rows: &[Vec<String>], num_cols: usize) -> Vec<usize> {
    let mut widths = vec![0usize; num_cols];
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }
    widths
}

/// A column is numeric when more than half of its data cells parse as
/// numbers.
fn numeric_columns(rows: &[Vec<String>], num_cols: usize) -> Vec<bool> {
    let mut numeric = vec![false; num_cols];
    for (index, flag) in numeric.iter_mut().enumerate() {
        let (hits, total) = rows.iter().skip(1).fold((0usize, 0usize), |(h, t), row| {
            row.get(index)
                .map_or((h, t), |cell| (h + usize::from(is_likely_number(cell)), t + 1))
        });
        *flag = total > 0 && hits > total / 2;
    }
    numeric
}

fn is_likely_number(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<i64>().is_ok() || trimmed.parse::<f64>().is_ok()
}

fn write_row(out: &mut String, row: &[String], widths: &[usize], numeric: &[bool]) {
    for (index, &width) in widths.iter().enumerate() {
        if index > 0 {
            out.push_str("  ");
        }
        let cell = row.get(index).map_or("", String::as_str);
        if numeric[index] {
            let _ = write!(out, "{cell:>width$}");
        } else {
            let _ = write!(out, "{cell:<width$}");
        }
    }
    // Trailing pad from the last left-aligned column
    while out.ends_with(' ') {
        out.pop();
    }
}

//! Format dispatch and failure isolation
//!
//! The dispatcher owns the extension-to-extractor registry and is the only
//! place where extraction failures are converted into results. Nothing
//! propagates past [`FormatDispatcher::process`]: an unregistered extension
//! becomes an `UnsupportedFormat` result, and any extractor error becomes an
//! `error`-bearing result for that file alone.

use crate::csv::CsvExtractor;
use crate::docx::DocxExtractor;
use crate::email::EmlExtractor;
use crate::image::ImageExtractor;
use crate::json::JsonExtractor;
use crate::pdf::PdfExtractor;
use crate::traits::{ExtractOptions, Extractor};
use crate::txt::TxtExtractor;
use crate::xlsx::XlsxExtractor;
use crate::xml::XmlExtractor;
use docharvest_core::{extension_label, Document, ExtractError, ExtractionResult, FileKind};
use std::collections::HashMap;
use std::path::Path;

/// Extension-keyed extractor registry
pub struct FormatDispatcher {
    extractors: HashMap<FileKind, Box<dyn Extractor>>,
    options: ExtractOptions,
}

impl FormatDispatcher {
    /// Build a dispatcher with every supported extractor registered.
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        let extractors: Vec<Box<dyn Extractor>> = vec![
            Box::new(DocxExtractor::new()),
            Box::new(PdfExtractor::new()),
            Box::new(XlsxExtractor::new()),
            Box::new(ImageExtractor::new(FileKind::Png)),
            Box::new(ImageExtractor::new(FileKind::Jpeg)),
            Box::new(TxtExtractor::new()),
            Box::new(EmlExtractor::new()),
            Box::new(JsonExtractor::new()),
            Box::new(XmlExtractor::new()),
            Box::new(CsvExtractor::new()),
        ];

        let mut registry = HashMap::new();
        for extractor in extractors {
            registry.insert(extractor.kind(), extractor);
        }

        Self {
            extractors: registry,
            options,
        }
    }

    /// Options shared by every registered extractor.
    #[must_use]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Whether a path's extension has a registered extractor.
    ///
    /// Archives are a meta-format and report `false` here; the expander
    /// routes them.
    #[must_use]
    pub fn is_registered_path(&self, path: &Path) -> bool {
        FileKind::from_path(path).is_some_and(|kind| self.extractors.contains_key(&kind))
    }

    /// Extract content from a document. Never fails past this boundary.
    ///
    /// On success the extractor's result is augmented with `file_name`,
    /// `file_type`, and `file_path` metadata; on failure the returned result
    /// carries the error kind and an empty (but defined) content string.
    #[must_use]
    pub fn process(&self, doc: &Document) -> ExtractionResult {
        log::info!("processing {} file: {}", doc.kind, doc.name);

        let mut result = match self.extractors.get(&doc.kind) {
            Some(extractor) => match extractor.extract(doc, &self.options) {
                Ok(result) => result,
                Err(error) => {
                    log::error!("error processing file {}: {error}", doc.name);
                    ExtractionResult::failure(error)
                }
            },
            None => ExtractionResult::failure(ExtractError::UnsupportedFormat(
                doc.kind.extension().to_string(),
            )),
        };

        result.set_meta("file_name", doc.name.clone());
        result.set_meta("file_type", doc.kind.extension());
        let path = doc
            .source_path
            .as_ref()
            .map_or_else(|| doc.name.clone(), |p| p.display().to_string());
        result.set_meta("file_path", path);
        result
    }

    /// Read a file from disk and extract its content. Never fails.
    ///
    /// Unregistered extensions yield an `UnsupportedFormat` result; read
    /// failures yield a `ParseFailure` result. File metadata is attached in
    /// every case.
    #[must_use]
    pub fn process_path(&self, path: &Path) -> ExtractionResult {
        match Document::from_path(path) {
            Ok(doc) => self.process(&doc),
            Err(error) => {
                log::error!("error processing file {}: {error}", path.display());
                let mut result = ExtractionResult::failure(error);
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
                result.set_meta("file_name", name);
                result.set_meta("file_type", extension_label(path));
                result.set_meta("file_path", path.display().to_string());
                result
            }
        }
    }
}

impl Default for FormatDispatcher {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

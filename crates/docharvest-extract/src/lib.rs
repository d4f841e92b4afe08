//! Per-format extractors and format dispatch for docharvest
//!
//! Each supported format gets one extractor implementing the [`Extractor`]
//! trait; the [`FormatDispatcher`] owns a registry of them keyed by
//! extension-derived [`FileKind`] and is the sole failure-isolation boundary
//! of the pipeline: whatever goes wrong inside an extractor is converted
//! into an `error`-bearing [`ExtractionResult`] so one corrupt file can
//! never abort a batch.
//!
//! # Supported formats
//!
//! | Format | Extractor | Notes |
//! |--------|-----------|-------|
//! | DOCX | [`DocxExtractor`] | paragraphs, tables, embedded-image OCR |
//! | PDF | [`PdfExtractor`] | native text layer, per-page |
//! | XLSX | [`XlsxExtractor`] | every sheet, pipe-joined rows |
//! | PNG/JPEG | [`ImageExtractor`] | preprocessing + multi-config OCR |
//! | TXT | [`TxtExtractor`] | UTF-8 with codepage fallback |
//! | EML | [`EmlExtractor`] | headers + plain-text body |
//! | JSON | [`JsonExtractor`] | stable pretty re-serialization |
//! | XML | [`XmlExtractor`] | text-only tree traversal |
//! | CSV | [`CsvExtractor`] | fixed-width table rendering |
//!
//! ZIP archives are a meta-format handled by the expander crate, which
//! re-submits contained files here.
//!
//! [`ExtractionResult`]: docharvest_core::ExtractionResult
//! [`FileKind`]: docharvest_core::FileKind

pub mod csv;
pub mod dispatcher;
pub mod docx;
pub mod email;
pub mod image;
pub mod json;
pub mod pdf;
pub mod traits;
pub mod txt;
pub mod xlsx;
pub mod xml;

pub use csv::CsvExtractor;
pub use dispatcher::FormatDispatcher;
pub use docx::DocxExtractor;
pub use email::EmlExtractor;
pub use image::ImageExtractor;
pub use json::JsonExtractor;
pub use pdf::PdfExtractor;
pub use traits::{ExtractOptions, Extractor};
pub use txt::TxtExtractor;
pub use xlsx::XlsxExtractor;
pub use xml::XmlExtractor;

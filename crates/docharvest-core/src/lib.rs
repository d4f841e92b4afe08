//! Core data model for docharvest
//!
//! This crate defines the types shared by every stage of the ingestion
//! pipeline:
//!
//! - [`FileKind`] - extension-derived format tag
//! - [`Document`] - a named byte payload awaiting extraction
//! - [`ExtractionResult`] - the uniform per-file extraction record
//! - [`ExtractError`] - the closed error taxonomy carried in results
//!
//! The contract that everything downstream relies on: an
//! [`ExtractionResult`] always has a defined (possibly empty) `content`
//! string, and `error` is set exactly when extraction could not produce
//! meaningful content. No extractor error value escapes the dispatch
//! boundary as anything other than an `error`-bearing result.

pub mod document;
pub mod error;
pub mod format;

pub use document::{extension_label, Document, ExtractionResult};
pub use error::ExtractError;
pub use format::FileKind;

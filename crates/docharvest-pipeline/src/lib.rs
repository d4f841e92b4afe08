//! Batch ingestion orchestration for docharvest
//!
//! [`IngestPipeline`] drives a batch: files are processed strictly in
//! submission order, archives are expanded in place, directories are walked,
//! and a failure in one file never blocks the rest. [`Corpus`] holds the
//! ordered per-file results plus the single aggregated text consumed by
//! downstream generation.
//!
//! The pipeline is synchronous and single-threaded on purpose: the OCR and
//! image libraries underneath are treated as non-reentrant, so no intra-batch
//! parallelism is attempted.

pub mod aggregate;
pub mod batch;

pub use aggregate::{ContentAggregator, Corpus, CorpusEntry};
pub use batch::IngestPipeline;

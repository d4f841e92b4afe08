//! Sequential batch processing
//!
//! Files are handled strictly in the order they were submitted. Each file's
//! scratch state is scoped to its own extraction; the isolation invariant
//! (one bad file never aborts a batch) is enforced at the dispatcher, so
//! this driver only routes.

use crate::aggregate::Corpus;
use docharvest_archive::ZipExpander;
use docharvest_core::{ExtractError, ExtractionResult, FileKind};
use docharvest_extract::{ExtractOptions, FormatDispatcher};
use std::path::Path;

/// Ordered batch driver over the dispatcher and archive expander
pub struct IngestPipeline {
    dispatcher: FormatDispatcher,
}

impl IngestPipeline {
    /// Build a pipeline with the given extraction options.
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            dispatcher: FormatDispatcher::new(options),
        }
    }

    /// The dispatcher backing this pipeline.
    #[must_use]
    pub fn dispatcher(&self) -> &FormatDispatcher {
        &self.dispatcher
    }

    /// Process an ordered batch of paths into per-file results.
    ///
    /// Archives contribute one result per contained registered file;
    /// directories are walked recursively. Result order follows submission
    /// order (archive-internal and directory walk order are best-effort).
    #[must_use]
    pub fn process_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<(String, ExtractionResult)> {
        let mut results = Vec::new();
        for path in paths {
            self.process_one(path.as_ref(), &mut results);
        }
        results
    }

    /// Process a batch and aggregate it into a corpus in one step.
    #[must_use]
    pub fn ingest<P: AsRef<Path>>(&self, paths: &[P]) -> Corpus {
        Corpus::build(self.process_paths(paths))
    }

    fn process_one(&self, path: &Path, results: &mut Vec<(String, ExtractionResult)>) {
        if path.is_dir() {
            self.walk_directory(path, results);
            return;
        }

        let name = file_name(path);
        if FileKind::from_path(path) == Some(FileKind::Zip) {
            match self.expand_archive(path) {
                Ok(children) => results.extend(children),
                Err(error) => {
                    log::error!("error processing file {}: {error}", path.display());
                    let mut result = ExtractionResult::failure(error);
                    result.set_meta("file_name", name.clone());
                    result.set_meta("file_type", FileKind::Zip.extension());
                    result.set_meta("file_path", path.display().to_string());
                    results.push((name, result));
                }
            }
        } else {
            results.push((name, self.dispatcher.process_path(path)));
        }
    }

    fn expand_archive(
        &self,
        path: &Path,
    ) -> Result<Vec<(String, ExtractionResult)>, ExtractError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ExtractError::ArchiveCorrupt(format!("could not read archive: {e}")))?;
        ZipExpander::new(&self.dispatcher).expand(&bytes)
    }

    /// Submit every registered file (and nested archive) under a directory.
    fn walk_directory(&self, dir: &Path, results: &mut Vec<(String, ExtractionResult)>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            log::warn!("could not read directory {}", dir.display());
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                self.walk_directory(&path, results);
            } else if self.dispatcher.is_registered_path(&path)
                || FileKind::from_path(&path) == Some(FileKind::Zip)
            {
                self.process_one(&path, results);
            }
        }
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_results_follow_submission_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "one").unwrap();
        std::fs::write(&second, "two").unwrap();

        let pipeline = IngestPipeline::default();
        let results = pipeline.process_paths(&[&second, &first]);

        assert_eq!(results[0].0, "second.txt");
        assert_eq!(results[1].0, "first.txt");
    }

    #[test]
    fn test_failure_does_not_block_following_files() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.pdf");
        let good = dir.path().join("good.txt");
        std::fs::write(&bad, "not a pdf at all").unwrap();
        std::fs::write(&good, "still processed").unwrap();

        let pipeline = IngestPipeline::default();
        let results = pipeline.process_paths(&[&bad, &good]);

        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_failed());
        assert_eq!(results[1].1.content, "still processed");
    }

    #[test]
    fn test_corrupt_archive_yields_single_errored_result() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        let mut file = std::fs::File::create(&archive).unwrap();
        file.write_all(b"not a zip").unwrap();

        let pipeline = IngestPipeline::default();
        let results = pipeline.process_paths(&[&archive]);

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].1.error,
            Some(ExtractError::ArchiveCorrupt(_))
        ));
    }

    #[test]
    fn test_directory_walk_skips_unregistered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "text").unwrap();
        std::fs::write(dir.path().join("b.bin"), "binary").unwrap();

        let pipeline = IngestPipeline::default();
        let results = pipeline.process_paths(&[dir.path()]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "a.txt");
    }
}

//! ZIP archive expansion
//!
//! An archive is a meta-format: its contents are extracted into a scoped
//! scratch directory, the directory is walked, and every contained file
//! whose extension is registered with the dispatcher is re-submitted to it.
//! Files with unregistered extensions are silently skipped.
//!
//! The scratch directory is a `TempDir`, released unconditionally when
//! expansion completes, including on every error path. Walk order
//! determines result order and is not guaranteed to be stable across
//! platforms; callers must not depend on byte-for-byte ordering of archive
//! contents.

use docharvest_core::{ExtractError, ExtractionResult};
use docharvest_extract::FormatDispatcher;
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

/// Entries larger than this are skipped with a warning instead of being
/// written to the scratch directory.
pub const MAX_ENTRY_SIZE: u64 = 100 * 1024 * 1024;

/// Expands ZIP archives and routes contained files through the dispatcher
pub struct ZipExpander<'a> {
    dispatcher: &'a FormatDispatcher,
}

impl<'a> ZipExpander<'a> {
    /// Create an expander that re-submits contained files to `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: &'a FormatDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Expand an archive into per-file extraction results.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ArchiveCorrupt`] when the archive cannot be
    /// opened or an entry cannot be extracted. Individual contained files
    /// never fail the expansion; their failures are isolated by the
    /// dispatcher as usual.
    pub fn expand(&self, bytes: &[u8]) -> Result<Vec<(String, ExtractionResult)>, ExtractError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractError::ArchiveCorrupt(e.to_string()))?;

        let scratch = tempfile::tempdir().map_err(|e| {
            ExtractError::ArchiveCorrupt(format!("could not create scratch directory: {e}"))
        })?;

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| ExtractError::ArchiveCorrupt(e.to_string()))?;
            if entry.is_dir() {
                continue;
            }
            if entry.size() > MAX_ENTRY_SIZE {
                log::warn!(
                    "skipping oversized archive entry {} ({} bytes)",
                    entry.name(),
                    entry.size()
                );
                continue;
            }
            let Some(relative) = sanitize_path(entry.name()) else {
                log::warn!("skipping archive entry with unsafe path: {}", entry.name());
                continue;
            };

            let destination = scratch.path().join(relative);
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ExtractError::ArchiveCorrupt(format!("could not create {}: {e}", parent.display()))
                })?;
            }
            let file = File::create(&destination).map_err(|e| {
                ExtractError::ArchiveCorrupt(format!("could not write {}: {e}", destination.display()))
            })?;
            let mut writer = BufWriter::new(file);
            std::io::copy(&mut entry, &mut writer).map_err(|e| {
                ExtractError::ArchiveCorrupt(format!("could not extract {}: {e}", entry.name()))
            })?;
        }

        let mut results = Vec::new();
        self.walk(scratch.path(), &mut results);
        Ok(results)
        // scratch dropped here; the directory is removed on success and on
        // every early return above
    }

    /// Recursive walk; registered files are dispatched, everything else is
    /// skipped.
    fn walk(&self, dir: &Path, results: &mut Vec<(String, ExtractionResult)>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                self.walk(&path, results);
            } else if self.dispatcher.is_registered_path(&path) {
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
                results.push((name, self.dispatcher.process_path(&path)));
            } else {
                log::debug!("skipping unregistered archive file: {}", path.display());
            }
        }
    }
}

/// Strip parent references, roots, and drive prefixes from an archive entry
/// path. Returns `None` when nothing safe remains.
fn sanitize_path(name: &str) -> Option<PathBuf> {
    let mut sanitized = PathBuf::new();
    for component in Path::new(name).components() {
        if let Component::Normal(part) = component {
            sanitized.push(part);
        }
    }
    if sanitized.as_os_str().is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

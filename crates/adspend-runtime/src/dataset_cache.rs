//! Mtime-keyed dataset cache for the explorer runtime.
//!
//! Wraps [`read_consolidated`] with a cache keyed by the consolidated file's
//! modification time. Callers use [`DatasetCache::get_data`] to obtain the
//! loaded dataset; the cache re-reads only when the file changed on disk (or
//! when a refresh is forced) and falls back to the previous snapshot when a
//! re-read fails mid-session.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use adspend_core::error::AdspendError;
use adspend_data::consolidated::{read_consolidated, LoadedDataset};

// ── DatasetCache ──────────────────────────────────────────────────────────────

/// Mtime-keyed wrapper around the consolidated CSV reader.
///
/// # Example
/// ```no_run
/// use adspend_runtime::dataset_cache::DatasetCache;
///
/// let mut cache = DatasetCache::new("data_clean/marketing_consolidado.csv");
/// if let Some(dataset) = cache.get_data(false) {
///     println!("{} canonical records", dataset.len());
/// }
/// ```
pub struct DatasetCache {
    /// Location of the consolidated CSV.
    path: PathBuf,
    /// Most recently loaded dataset.
    cache: Option<LoadedDataset>,
    /// Modification time of the file when the cache was populated.
    cached_mtime: Option<SystemTime>,
    /// The last load error encountered.
    last_error: Option<AdspendError>,
}

impl DatasetCache {
    /// Create a cache for the consolidated file at `path`. Nothing is read
    /// until the first [`get_data`](Self::get_data) call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
            cached_mtime: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the dataset, re-reading the file when it changed on disk.
    ///
    /// When `force_refresh` is `true` the mtime check is skipped and a fresh
    /// read is always attempted. On read failure the previous snapshot (if
    /// any) is returned as a best-effort fallback and the error is kept for
    /// [`last_error`](Self::last_error).
    pub fn get_data(&mut self, force_refresh: bool) -> Option<&LoadedDataset> {
        if !force_refresh && self.is_cache_valid() {
            return self.cache.as_ref();
        }

        match read_consolidated(&self.path) {
            Ok(dataset) => {
                tracing::debug!(
                    records = dataset.len(),
                    file = %self.path.display(),
                    "dataset cache updated"
                );
                self.cached_mtime = file_mtime(&self.path);
                self.cache = Some(dataset);
                self.last_error = None;
                self.cache.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset load failed; keeping previous snapshot");
                self.last_error = Some(e);
                // Return whatever we have, even if stale.
                self.cache.as_ref()
            }
        }
    }

    /// Discard the snapshot, forcing the next [`get_data`](Self::get_data)
    /// call to read from disk.
    pub fn invalidate(&mut self) {
        self.cache = None;
        self.cached_mtime = None;
        tracing::debug!("dataset cache invalidated");
    }

    /// Location of the consolidated file this cache reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last load error, or `None` after a successful read.
    pub fn last_error(&self) -> Option<&AdspendError> {
        self.last_error.as_ref()
    }

    /// `true` when the last load failed because the file does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(
            self.last_error,
            Some(AdspendError::MissingConsolidated { .. })
        )
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// `true` when a snapshot exists and the file's mtime still matches the
    /// one captured at load time.
    fn is_cache_valid(&self) -> bool {
        match (self.cache.as_ref(), self.cached_mtime) {
            (Some(_), Some(mtime)) => file_mtime(&self.path) == Some(mtime),
            _ => false,
        }
    }
}

/// Modification time of `path`, or `None` when the file cannot be stat'ed.
fn file_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

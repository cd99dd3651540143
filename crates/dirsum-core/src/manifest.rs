//! Manifest container and statistics.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;
use crate::error::ScanWarning;
use crate::record::FileRecord;

/// Summary statistics for a manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestStats {
    /// Total size of all recorded files in bytes.
    pub total_size: u64,
    /// Total number of records.
    pub total_files: u64,
    /// Records whose hash computation failed.
    pub failed_hashes: u64,
    /// Maximum depth reached below the root.
    pub max_depth: u32,
    /// Largest file (path, size).
    pub largest_file: Option<(PathBuf, u64)>,
}

impl ManifestStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with one record.
    pub fn record(&mut self, record: &FileRecord, depth: u32) {
        self.total_files += 1;
        self.total_size += record.size;
        self.max_depth = self.max_depth.max(depth);

        if !record.is_hashed() {
            self.failed_hashes += 1;
        }

        if self
            .largest_file
            .as_ref()
            .is_none_or(|(_, size)| record.size > *size)
        {
            self.largest_file = Some((record.path.clone(), record.size));
        }
    }
}

/// Complete, immutable output of one traversal-and-hash run.
///
/// Records appear in traversal order; that order is an accepted weak
/// invariant and is not guaranteed stable across filesystems or runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Absolute, canonicalized path that was scanned.
    pub root_path: PathBuf,

    /// Digest algorithm used for every record.
    pub algorithm: HashAlgorithm,

    /// When this run was executed.
    pub generated_at: DateTime<Utc>,

    /// Duration of the run.
    pub scan_duration: Duration,

    /// One record per regular file under the root.
    pub records: Vec<FileRecord>,

    /// Summary statistics.
    pub stats: ManifestStats,

    /// Non-fatal problems encountered during the run.
    pub warnings: Vec<ScanWarning>,
}

impl Manifest {
    /// Create a new manifest stamped with the current time.
    pub fn new(
        root_path: PathBuf,
        algorithm: HashAlgorithm,
        records: Vec<FileRecord>,
        stats: ManifestStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root_path,
            algorithm,
            generated_at: Utc::now(),
            scan_duration,
            records,
            stats,
            warnings,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the manifest holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total size of all recorded files.
    pub fn total_size(&self) -> u64 {
        self.stats.total_size
    }

    /// Number of records with a failed hash.
    pub fn failed_count(&self) -> u64 {
        self.stats.failed_hashes
    }

    /// Check if there were any warnings during the run.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Look up a record by its relative path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileRecord> {
        let path = path.as_ref();
        self.records.iter().find(|record| record.path == path)
    }
}

//! Per-file manifest records and timestamp handling.

use std::fs::Metadata;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// File timestamps in signed milliseconds since the Unix epoch.
///
/// `changed` and `created` are platform-dependent: where the filesystem
/// reports no ctime or birth time, they fall back to `modified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Last modification time.
    pub modified: i64,
    /// Last status change time (ctime on Unix).
    pub changed: i64,
    /// Creation (birth) time.
    pub created: i64,
}

impl Timestamps {
    /// Extract timestamps from stat metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let modified = metadata.modified().map(system_time_ms).unwrap_or(0);
        Self {
            modified,
            changed: ctime_ms(metadata).unwrap_or(modified),
            created: metadata
                .created()
                .ok()
                .map(system_time_ms)
                .unwrap_or(modified),
        }
    }

    /// Create timestamps where every field carries the same value.
    pub fn with_modified(modified: i64) -> Self {
        Self {
            modified,
            changed: modified,
            created: modified,
        }
    }
}

/// Convert a `SystemTime` to signed milliseconds since the Unix epoch.
///
/// Pre-epoch times come out negative rather than erroring.
pub fn system_time_ms(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(err) => -(err.duration().as_millis() as i64),
    }
}

#[cfg(unix)]
fn ctime_ms(metadata: &Metadata) -> Option<i64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.ctime() * 1000 + metadata.ctime_nsec() / 1_000_000)
}

#[cfg(not(unix))]
fn ctime_ms(_metadata: &Metadata) -> Option<i64> {
    None
}

/// One file in a manifest.
///
/// Immutable once appended: the record captures the file's content digest
/// and stat metadata as observed at scan time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scanned root; unique within one run.
    pub path: PathBuf,
    /// Lowercase hex digest, or `None` when the hash computation failed.
    pub hash: Option<String>,
    /// Size in bytes at scan time.
    pub size: u64,
    /// Stat timestamps, flattened into `modified`/`changed`/`created`.
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl FileRecord {
    /// Record for a successfully hashed file.
    pub fn hashed(
        path: impl Into<PathBuf>,
        hash: impl Into<String>,
        size: u64,
        timestamps: Timestamps,
    ) -> Self {
        Self {
            path: path.into(),
            hash: Some(hash.into()),
            size,
            timestamps,
        }
    }

    /// Record for a file whose contents could not be read.
    pub fn failed(path: impl Into<PathBuf>, size: u64, timestamps: Timestamps) -> Self {
        Self {
            path: path.into(),
            hash: None,
            size,
            timestamps,
        }
    }

    /// Whether the digest was computed.
    pub fn is_hashed(&self) -> bool {
        self.hash.is_some()
    }
}

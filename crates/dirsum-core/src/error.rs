//! Error types for scanning and hashing operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that abort a run before any records are produced.
///
/// Per-file failures never surface here; they become [`ScanWarning`]s
/// attached to the manifest instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The requested digest algorithm is not recognized.
    #[error("Unsupported hash algorithm '{name}' (supported: md5, sha1, sha256, sha512, blake2b, blake3)")]
    UnsupportedAlgorithm { name: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The hashing thread pool could not be built.
    #[error("Failed to build hashing thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error listing a directory or entry; the subtree was skipped.
    ReadError,
    /// Error reading entry metadata.
    MetadataError,
    /// A file's contents could not be read for hashing.
    HashError,
    /// The scan root exists but is not a directory.
    NotADirectory,
}

/// Non-fatal problem encountered during a run.
///
/// Warnings are data: they ride along in the manifest so downstream
/// consumers can tell which files failed and why, without any per-file
/// failure aborting the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for an entry that could not be listed.
    pub fn read_error(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        let path = path.into();
        Self {
            message: format!("Read error: {error}"),
            path,
            kind: WarningKind::ReadError,
        }
    }

    /// Create a warning for an entry whose metadata could not be read.
    pub fn metadata_error(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        let path = path.into();
        Self {
            message: format!("Metadata error: {error}"),
            path,
            kind: WarningKind::MetadataError,
        }
    }

    /// Create a hash failure warning.
    pub fn hash_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Failed to hash {}: {error}", path.display()),
            path,
            kind: WarningKind::HashError,
        }
    }

    /// Create a warning for a scan root that is not a directory.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Not a directory: {}", path.display()),
            path,
            kind: WarningKind::NotADirectory,
        }
    }
}

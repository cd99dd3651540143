//! File hashing and manifest assembly for dirsum.
//!
//! This crate drives the walker from `dirsum-scan` through a streaming
//! hasher and assembles the final manifest:
//!
//! - **Streaming digests** - fixed-size buffered reads, never the whole
//!   file in memory, with a memory-mapped fast path for BLAKE3
//! - **Bounded concurrency** - hashing runs on a rayon pool sized by
//!   `ScanConfig::threads`, which also caps open file handles
//! - **Failure isolation** - a file that cannot be read becomes a record
//!   with a null hash plus a warning; the run continues
//! - **Progress updates** - via a tokio broadcast channel
//!
//! # Example
//!
//! ```rust,no_run
//! use dirsum_digest::{ManifestBuilder, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let manifest = ManifestBuilder::new().build(&config).unwrap();
//!
//! println!("{} files, {} failed", manifest.len(), manifest.failed_count());
//! for record in &manifest.records {
//!     println!("{:?}  {}", record.hash, record.path.display());
//! }
//! ```

mod builder;
mod hasher;
mod progress;

pub use builder::ManifestBuilder;
pub use hasher::hash_file;
pub use progress::HashProgress;

// Re-export core types for convenience
pub use dirsum_core::{
    FileRecord, HashAlgorithm, Manifest, ManifestStats, ScanConfig, ScanError, ScanWarning,
    Timestamps, WarningKind,
};

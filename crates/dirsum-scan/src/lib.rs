//! Directory traversal for dirsum.
//!
//! This crate provides the [`Walker`]: a lazy, finite, single-pass iterator
//! over every regular file reachable from a root path, built on jwalk for
//! parallel directory listing.
//!
//! The walker yields one [`FileDescriptor`] per regular file (relative path,
//! absolute path, stat metadata) and one [`WalkItem::Skipped`] warning per
//! entry it could not list or stat. Unreadable subtrees are skipped, never
//! fatal. File contents are not touched.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirsum_scan::{ScanConfig, WalkItem, Walker};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! for item in Walker::new(&config).unwrap() {
//!     match item {
//!         WalkItem::File(descriptor) => {
//!             println!("{} ({} bytes)", descriptor.relative_path.display(), descriptor.size);
//!         }
//!         WalkItem::Skipped(warning) => eprintln!("skipped: {}", warning.message),
//!     }
//! }
//! ```

mod walker;

pub use walker::{FileDescriptor, WalkItem, Walker};

// Re-export core types for convenience
pub use dirsum_core::{ScanConfig, ScanError, ScanWarning, Timestamps, WarningKind};

//! Core types and traits for dirsum.
//!
//! This crate provides the fundamental data structures shared across the
//! dirsum workspace: per-file records, the manifest container, scan
//! configuration, digest algorithm selection, and error/warning types.

mod algorithm;
mod config;
mod error;
mod manifest;
mod record;

pub use algorithm::HashAlgorithm;
pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use manifest::{Manifest, ManifestStats};
pub use record::{FileRecord, Timestamps, system_time_ms};

//! Manifest assembly: drives the walker and hashes every file.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tokio::sync::broadcast;
use tracing::warn;

use dirsum_core::{
    FileRecord, Manifest, ManifestStats, ScanConfig, ScanError, ScanWarning,
};
use dirsum_scan::{FileDescriptor, WalkItem, Walker};

use crate::hasher::hash_file;
use crate::progress::HashProgress;

/// Files between progress broadcasts.
const PROGRESS_INTERVAL: u64 = 256;

/// Builds a complete manifest for a directory tree.
///
/// The builder drains the walker, dispatches one hash computation per
/// regular file on a bounded rayon pool, and assembles records behind a
/// wait-for-all barrier. Every file appears exactly once: with a digest on
/// success, or with a null hash plus a warning when its contents could not
/// be read. Records keep traversal order even when hashing runs in
/// parallel (the parallel map is indexed, so collection preserves input
/// order).
pub struct ManifestBuilder {
    progress_tx: broadcast::Sender<HashProgress>,
}

impl ManifestBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<HashProgress> {
        self.progress_tx.subscribe()
    }

    /// Walk the tree, hash every regular file, and assemble the manifest.
    ///
    /// Only pre-flight problems abort: a missing root, an invalid ignore
    /// pattern, or a thread pool that cannot be built. A root that exists
    /// but is not a directory yields an empty manifest carrying a single
    /// warning rather than an error.
    pub fn build(&self, config: &ScanConfig) -> Result<Manifest, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root_path.is_dir() {
            let warning = ScanWarning::not_a_directory(&root_path);
            warn!(path = %root_path.display(), "scan root is not a directory");
            return Ok(Manifest::new(
                root_path,
                config.algorithm,
                Vec::new(),
                ManifestStats::new(),
                start.elapsed(),
                vec![warning],
            ));
        }

        let mut warnings = Vec::new();
        let mut descriptors = Vec::new();

        for item in Walker::new(config)? {
            match item {
                WalkItem::File(descriptor) => {
                    descriptors.push(descriptor);
                    if descriptors.len() as u64 % PROGRESS_INTERVAL == 0 {
                        let _ = self.progress_tx.send(HashProgress {
                            files_walked: descriptors.len() as u64,
                            elapsed: start.elapsed(),
                            ..HashProgress::new()
                        });
                    }
                }
                WalkItem::Skipped(warning) => {
                    warn!(path = %warning.path.display(), "{}", warning.message);
                    warnings.push(warning);
                }
            }
        }

        let (records, hash_warnings) = self.hash_all(&descriptors, config, start)?;
        warnings.extend(hash_warnings);

        let mut stats = ManifestStats::new();
        for (record, descriptor) in records.iter().zip(&descriptors) {
            stats.record(record, descriptor.depth);
        }

        Ok(Manifest::new(
            root_path,
            config.algorithm,
            records,
            stats,
            start.elapsed(),
            warnings,
        ))
    }

    /// Hash every descriptor on a bounded pool, preserving input order.
    ///
    /// Returns once every computation has settled; pool size caps the
    /// number of concurrently open file handles.
    fn hash_all(
        &self,
        descriptors: &[FileDescriptor],
        config: &ScanConfig,
        start: Instant,
    ) -> Result<(Vec<FileRecord>, Vec<ScanWarning>), ScanError> {
        let algorithm = config.algorithm;
        let total = descriptors.len() as u64;
        let hashed = AtomicU64::new(0);
        let failed = AtomicU64::new(0);
        let bytes = AtomicU64::new(0);

        let hash_one = |descriptor: &FileDescriptor| -> (FileRecord, Option<ScanWarning>) {
            let outcome = hash_file(&descriptor.absolute_path, algorithm);
            let done = hashed.fetch_add(1, Ordering::Relaxed) + 1;

            let (record, warning) = match outcome {
                Ok(hash) => {
                    bytes.fetch_add(descriptor.size, Ordering::Relaxed);
                    (
                        FileRecord::hashed(
                            descriptor.relative_path.clone(),
                            hash,
                            descriptor.size,
                            descriptor.timestamps,
                        ),
                        None,
                    )
                }
                Err(err) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    warn!(path = %descriptor.absolute_path.display(), error = %err, "failed to hash file");
                    (
                        FileRecord::failed(
                            descriptor.relative_path.clone(),
                            descriptor.size,
                            descriptor.timestamps,
                        ),
                        Some(ScanWarning::hash_error(&descriptor.absolute_path, &err)),
                    )
                }
            };

            if done % PROGRESS_INTERVAL == 0 || done == total {
                let _ = self.progress_tx.send(HashProgress {
                    files_walked: total,
                    files_hashed: done,
                    failures: failed.load(Ordering::Relaxed),
                    bytes_hashed: bytes.load(Ordering::Relaxed),
                    current_path: Some(descriptor.absolute_path.clone()),
                    elapsed: start.elapsed(),
                });
            }

            (record, warning)
        };

        let outcomes: Vec<(FileRecord, Option<ScanWarning>)> = match config.threads {
            0 => descriptors.par_iter().map(&hash_one).collect(),
            n => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(ScanError::ThreadPool)?;
                pool.install(|| descriptors.par_iter().map(&hash_one).collect())
            }
        };

        let mut records = Vec::with_capacity(outcomes.len());
        let mut warnings = Vec::new();
        for (record, warning) in outcomes {
            records.push(record);
            if let Some(warning) = warning {
                warnings.push(warning);
            }
        }

        Ok((records, warnings))
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

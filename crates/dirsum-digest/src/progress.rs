//! Progress reporting for manifest builds.

use std::path::PathBuf;
use std::time::Duration;

/// Progress information during a manifest build.
#[derive(Debug, Clone)]
pub struct HashProgress {
    /// Files discovered by the walker so far.
    pub files_walked: u64,
    /// Hash computations settled so far (success or failure).
    pub files_hashed: u64,
    /// Hash computations that failed so far.
    pub failures: u64,
    /// Bytes hashed so far.
    pub bytes_hashed: u64,
    /// File most recently dispatched for hashing.
    pub current_path: Option<PathBuf>,
    /// Time elapsed since the build started.
    pub elapsed: Duration,
}

impl HashProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_walked: 0,
            files_hashed: 0,
            failures: 0,
            bytes_hashed: 0,
            current_path: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Hashing rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_hashed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Hashing rate in bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.bytes_hashed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for HashProgress {
    fn default() -> Self {
        Self::new()
    }
}

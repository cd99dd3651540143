//! jwalk-based lazy directory walker.

use std::path::{Path, PathBuf};
use std::time::Duration;

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::{Parallelism, WalkDir};

use dirsum_core::{ScanConfig, ScanError, ScanWarning, Timestamps};

/// A traversal-yielded reference to one regular file, prior to its content
/// being read.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    /// Path relative to the scanned root.
    pub relative_path: PathBuf,
    /// Absolute path, for opening the file.
    pub absolute_path: PathBuf,
    /// Size in bytes as reported by stat.
    pub size: u64,
    /// Stat timestamps in epoch milliseconds.
    pub timestamps: Timestamps,
    /// Depth below the root (files directly under the root are depth 1).
    pub depth: u32,
}

/// One item produced by the walker.
#[derive(Debug)]
pub enum WalkItem {
    /// A regular file to be hashed.
    File(FileDescriptor),
    /// An entry that could not be listed or stat'd; traversal continued.
    Skipped(ScanWarning),
}

/// Lazy, single-pass iterator over every regular file under a root.
///
/// Directories and non-regular entries are consumed internally and never
/// yielded. The sequence is finite (bounded by the tree's entry count at
/// scan start) and not restartable. Relative order across runs or
/// filesystems is not guaranteed.
pub struct Walker {
    root: PathBuf,
    ignore: GlobSet,
    entries: jwalk::DirEntryIter<((), ())>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("ignore", &self.ignore)
            .finish_non_exhaustive()
    }
}

impl Walker {
    /// Prepare a traversal.
    ///
    /// Pre-flight checks fail fast: a missing root, a root that is not a
    /// directory, or an ignore pattern that does not compile all abort
    /// before any entry is produced.
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let root = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        let ignore = build_ignore_set(&config.ignore_patterns)?;

        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let entries = WalkDir::new(&root)
            .parallelism(parallelism)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .min_depth(0)
            .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX))
            .into_iter();

        Ok(Self {
            root,
            ignore,
            entries,
        })
    }

    /// The canonicalized root this walker traverses.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_ignored(&self, relative: &Path) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        if self.ignore.is_match(relative) {
            return true;
        }
        // Also match individual components, so a directory pattern hides
        // everything beneath it.
        relative
            .components()
            .any(|c| self.ignore.is_match(Path::new(c.as_os_str())))
    }
}

impl Iterator for Walker {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    return Some(WalkItem::Skipped(ScanWarning::read_error(path, &err)));
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative_path = path
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());

            if self.is_ignored(&relative_path) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    return Some(WalkItem::Skipped(ScanWarning::metadata_error(&path, &err)));
                }
            };

            return Some(WalkItem::File(FileDescriptor {
                relative_path,
                absolute_path: path,
                size: metadata.len(),
                timestamps: Timestamps::from_metadata(&metadata),
                depth: entry.depth() as u32,
            }));
        }
    }
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
            message: format!("bad ignore pattern '{pattern}': {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidConfig {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    fn relative_paths(config: &ScanConfig) -> BTreeSet<PathBuf> {
        Walker::new(config)
            .unwrap()
            .filter_map(|item| match item {
                WalkItem::File(d) => Some(d.relative_path),
                WalkItem::Skipped(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_walker_finds_all_files() {
        let temp = create_test_tree();
        let paths = relative_paths(&ScanConfig::new(temp.path()));

        let expected: BTreeSet<PathBuf> = [
            "file1.txt",
            "dir1/file2.txt",
            "dir1/subdir/file3.txt",
            "dir2/file4.txt",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        assert_eq!(paths, expected);
    }

    #[test]
    fn test_walker_descriptor_fields() {
        let temp = create_test_tree();
        let items: Vec<_> = Walker::new(&ScanConfig::new(temp.path())).unwrap().collect();

        for item in items {
            let WalkItem::File(descriptor) = item else {
                panic!("unexpected warning in clean tree");
            };
            assert!(descriptor.absolute_path.is_absolute());
            assert!(descriptor.relative_path.is_relative());
            assert!(descriptor.size > 0);
            assert!(descriptor.depth >= 1);
            assert!(descriptor.timestamps.modified > 0);
        }
    }

    #[test]
    fn test_walker_empty_directory() {
        let temp = TempDir::new().unwrap();
        let items: Vec<_> = Walker::new(&ScanConfig::new(temp.path())).unwrap().collect();
        assert!(items.is_empty());
    }

    #[test]
    fn test_walker_rejects_non_directory_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "not a directory").unwrap();

        let err = Walker::new(&ScanConfig::new(&file)).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[test]
    fn test_walker_missing_root() {
        let err = Walker::new(&ScanConfig::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_walker_ignore_patterns() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .ignore_patterns(vec!["dir2".to_string(), "*.log".to_string()])
            .build()
            .unwrap();

        let paths = relative_paths(&config);
        assert!(!paths.iter().any(|p| p.starts_with("dir2")));
        assert!(paths.contains(&PathBuf::from("file1.txt")));
    }

    #[test]
    fn test_walker_bad_ignore_pattern() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .ignore_patterns(vec!["a[".to_string()])
            .build()
            .unwrap();

        let err = Walker::new(&config).unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig { .. }));
    }

    #[test]
    fn test_walker_max_depth() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .max_depth(1u32)
            .build()
            .unwrap();

        let paths = relative_paths(&config);
        let expected: BTreeSet<PathBuf> = [PathBuf::from("file1.txt")].into_iter().collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_walker_hidden_files() {
        let temp = create_test_tree();
        fs::write(temp.path().join(".hidden"), "secret").unwrap();

        let with_hidden = relative_paths(&ScanConfig::new(temp.path()));
        assert!(with_hidden.contains(&PathBuf::from(".hidden")));

        let config = ScanConfig::builder()
            .root(temp.path())
            .include_hidden(false)
            .build()
            .unwrap();
        let without_hidden = relative_paths(&config);
        assert!(!without_hidden.contains(&PathBuf::from(".hidden")));
    }

    #[test]
    fn test_walker_skips_directories_and_symlinks() {
        let temp = create_test_tree();
        #[cfg(unix)]
        std::os::unix::fs::symlink(
            temp.path().join("file1.txt"),
            temp.path().join("link-to-file1"),
        )
        .unwrap();

        let paths = relative_paths(&ScanConfig::new(temp.path()));
        assert!(!paths.contains(&PathBuf::from("dir1")));
        #[cfg(unix)]
        assert!(!paths.contains(&PathBuf::from("link-to-file1")));
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_skips_unreadable_subtree_with_warning() {
        use std::os::unix::fs::PermissionsExt;

        use dirsum_core::WarningKind;

        let temp = create_test_tree();
        let sealed = temp.path().join("sealed");
        fs::create_dir(&sealed).unwrap();
        fs::write(sealed.join("inside.txt"), "cannot list me").unwrap();
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o000)).unwrap();

        // A privileged process can list anything; nothing to assert then.
        if fs::read_dir(&sealed).is_ok() {
            fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let items: Vec<_> = Walker::new(&ScanConfig::new(temp.path())).unwrap().collect();
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();

        let files: BTreeSet<PathBuf> = items
            .iter()
            .filter_map(|item| match item {
                WalkItem::File(d) => Some(d.relative_path.clone()),
                WalkItem::Skipped(_) => None,
            })
            .collect();
        let warnings: Vec<_> = items
            .iter()
            .filter_map(|item| match item {
                WalkItem::Skipped(w) => Some(w),
                WalkItem::File(_) => None,
            })
            .collect();

        assert_eq!(files.len(), 4);
        assert!(!files.contains(&PathBuf::from("sealed/inside.txt")));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::ReadError);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_follows_symlinks_when_configured() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(
            temp.path().join("file1.txt"),
            temp.path().join("link-to-file1"),
        )
        .unwrap();

        let config = ScanConfig::builder()
            .root(temp.path())
            .follow_symlinks(true)
            .build()
            .unwrap();

        let paths = relative_paths(&config);
        assert!(paths.contains(&PathBuf::from("link-to-file1")));
    }
}

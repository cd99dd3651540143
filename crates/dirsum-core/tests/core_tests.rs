use std::path::PathBuf;
use std::time::Duration;

use dirsum_core::{
    FileRecord, HashAlgorithm, Manifest, ManifestStats, ScanConfig, ScanWarning, Timestamps,
    WarningKind,
};

#[test]
fn test_algorithm_parsing_and_supported_list() {
    let supported = HashAlgorithm::supported();
    assert!(supported.contains(&"sha256"));
    assert!(supported.contains(&"md5"));
    assert!(supported.contains(&"blake3"));

    for name in supported {
        assert!(HashAlgorithm::parse(name).is_ok());
    }

    assert!(HashAlgorithm::parse("xxhash").is_err());
}

#[test]
fn test_record_uniqueness_within_manifest() {
    let ts = Timestamps::with_modified(1_000);
    let records = vec![
        FileRecord::hashed("a.txt", "aa", 1, ts),
        FileRecord::hashed("sub/a.txt", "bb", 2, ts),
        FileRecord::failed("sub/b.txt", 3, ts),
    ];

    let mut stats = ManifestStats::new();
    for record in &records {
        stats.record(record, 1);
    }

    let manifest = Manifest::new(
        PathBuf::from("/scanned"),
        HashAlgorithm::Sha256,
        records,
        stats,
        Duration::from_secs(1),
        vec![ScanWarning::new(
            "/scanned/sub/b.txt",
            "simulated",
            WarningKind::HashError,
        )],
    );

    // Paths are distinct even when file names collide across directories.
    let mut paths: Vec<_> = manifest.records.iter().map(|r| &r.path).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), manifest.len());

    assert_eq!(manifest.failed_count(), 1);
    assert!(manifest.has_warnings());
}

#[test]
fn test_manifest_json_shape() {
    let ts = Timestamps::with_modified(1_700_000_000_123);
    let record = FileRecord::hashed("dir/file.bin", "cafe", 9, ts);
    let mut stats = ManifestStats::new();
    stats.record(&record, 2);

    let manifest = Manifest::new(
        PathBuf::from("/root"),
        HashAlgorithm::Blake3,
        vec![record],
        stats,
        Duration::from_millis(10),
        Vec::new(),
    );

    let json = serde_json::to_value(&manifest).unwrap();
    assert_eq!(json["algorithm"], "blake3");
    assert_eq!(json["root_path"], "/root");
    assert_eq!(json["records"][0]["path"], "dir/file.bin");
    assert_eq!(json["records"][0]["hash"], "cafe");
    assert_eq!(json["records"][0]["modified"], 1_700_000_000_123i64);
    assert_eq!(json["stats"]["total_files"], 1);
}

#[test]
fn test_manifest_json_roundtrip() {
    let ts = Timestamps::with_modified(5);
    let manifest = Manifest::new(
        PathBuf::from("/root"),
        HashAlgorithm::Md5,
        vec![FileRecord::failed("f", 2, ts)],
        ManifestStats::new(),
        Duration::from_millis(1),
        Vec::new(),
    );

    let json = serde_json::to_string(&manifest).unwrap();
    let back: Manifest = serde_json::from_str(&json).unwrap();
    assert_eq!(back.algorithm, HashAlgorithm::Md5);
    assert_eq!(back.records, manifest.records);
}

#[test]
fn test_config_serde_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{"root": "/data"}"#).unwrap();
    assert_eq!(config.root, PathBuf::from("/data"));
    assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    assert!(config.include_hidden);
    assert!(!config.follow_symlinks);
    assert!(config.max_depth.is_none());
}

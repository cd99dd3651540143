//! dirsum - checksum manifests for directory trees.
//!
//! Usage:
//!   dirsum [PATH]                      Print a text manifest of PATH
//!   dirsum -a blake3 [PATH]            Pick the digest algorithm
//!   dirsum -f json -o out.json [PATH]  Write a JSON manifest to a file
//!   dirsum -f tsv [PATH]               Tab-separated rows on stdout
//!   dirsum --help                      Show help

mod output;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use dirsum_core::{HashAlgorithm, ScanConfig};
use dirsum_digest::ManifestBuilder;

use crate::output::{OutputFormat, render};

#[derive(Parser)]
#[command(
    name = "dirsum",
    version,
    about = "Checksum manifests for directory trees",
    long_about = "dirsum walks a directory tree, computes a streaming digest of every \
                  regular file, and emits a manifest of per-file hashes and stat \
                  metadata for integrity verification and change detection."
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Digest algorithm (md5, sha1, sha256, sha512, blake2b, blake3)
    #[arg(short, long, default_value = "sha256")]
    algorithm: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Write the manifest to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Threads for traversal and hashing (0 = one per core)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Maximum traversal depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Follow symbolic links
    #[arg(long)]
    follow_symlinks: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Glob patterns to skip (repeatable)
    #[arg(short, long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Reject bad algorithm names before any traversal starts.
    let algorithm = HashAlgorithm::parse(&cli.algorithm)?;

    let config = ScanConfig::builder()
        .root(cli.path)
        .algorithm(algorithm)
        .threads(cli.threads)
        .max_depth(cli.max_depth)
        .follow_symlinks(cli.follow_symlinks)
        .include_hidden(!cli.no_hidden)
        .ignore_patterns(cli.ignore)
        .build()
        .context("Invalid configuration")?;

    tracing::info!(path = %config.root.display(), %algorithm, "scanning");

    let manifest = ManifestBuilder::new()
        .build(&config)
        .context("Scan failed")?;

    if manifest.has_warnings() {
        tracing::warn!(count = manifest.warnings.len(), "scan finished with warnings");
    }

    render(&manifest, cli.format, cli.output.as_deref())?;

    Ok(())
}

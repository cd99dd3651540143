//! Manifest renderers: text summary, JSON document, TSV rows.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use clap::ValueEnum;
use color_eyre::eyre::{Context, Result};
use humansize::{DECIMAL, format_size};
use tempfile::NamedTempFile;

use dirsum_core::Manifest;

/// Output format for a rendered manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with one digest line per file.
    #[default]
    Text,
    /// The complete manifest as a pretty-printed JSON document.
    Json,
    /// One tab-separated row per record.
    Tsv,
}

/// Render a manifest to stdout, or atomically to a file.
pub fn render(manifest: &Manifest, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(manifest),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(manifest)
                .context("Failed to serialize manifest")?;
            json.push('\n');
            json
        }
        OutputFormat::Tsv => render_tsv(manifest),
    };

    match output {
        None => {
            print!("{rendered}");
            Ok(())
        }
        Some(path) => write_atomic(path, &rendered),
    }
}

fn render_text(manifest: &Manifest) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "─".repeat(70));
    let _ = writeln!(
        out,
        " {} ({} digest)",
        manifest.root_path.display(),
        manifest.algorithm
    );
    let _ = writeln!(
        out,
        " {} files, {} - scanned in {:.2}s",
        manifest.len(),
        format_size(manifest.total_size(), DECIMAL),
        manifest.scan_duration.as_secs_f64()
    );
    let _ = writeln!(out, "{}", "─".repeat(70));

    for record in &manifest.records {
        match &record.hash {
            Some(hash) => {
                let _ = writeln!(out, "{hash}  {}", record.path.display());
            }
            None => {
                let _ = writeln!(
                    out,
                    "{}  {}",
                    "-".repeat(manifest.algorithm.digest_len()),
                    record.path.display()
                );
            }
        }
    }

    if manifest.has_warnings() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} warning(s) during scan", manifest.warnings.len());
    }

    out
}

/// Tab-separated rows: path, hash, size, modified (epoch ms). A failed
/// hash renders as `-`.
fn render_tsv(manifest: &Manifest) -> String {
    let mut out = String::from("path\thash\tsize\tmodified\n");
    for record in &manifest.records {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            record.path.display(),
            record.hash.as_deref().unwrap_or("-"),
            record.size,
            record.timestamps.modified
        );
    }
    out
}

/// Write via a temp file in the destination directory, then persist, so a
/// failed write never leaves a partial manifest behind.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file =
        NamedTempFile::new_in(dir).context("Failed to create temporary output file")?;
    file.write_all(contents.as_bytes())
        .context("Failed to write manifest")?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

//! Streaming file digests.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use blake2::Blake2b512;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use dirsum_core::HashAlgorithm;

/// Read buffer size for streaming digests.
const BUF_SIZE: usize = 64 * 1024;

/// Files at or above this size use BLAKE3's memory-mapped fast path.
const MMAP_THRESHOLD: u64 = 128 * 1024;

/// Compute the lowercase hex digest of a file's full byte content.
///
/// Contents are streamed in fixed-size chunks; the file is never loaded
/// into memory at once, and the handle is released on every exit path.
/// A file that cannot be opened or read yields the I/O error for the
/// caller to translate into a null-hash record.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> io::Result<String> {
    match algorithm {
        HashAlgorithm::Md5 => digest_file::<Md5>(path),
        HashAlgorithm::Sha1 => digest_file::<Sha1>(path),
        HashAlgorithm::Sha256 => digest_file::<Sha256>(path),
        HashAlgorithm::Sha512 => digest_file::<Sha512>(path),
        HashAlgorithm::Blake2b => digest_file::<Blake2b512>(path),
        HashAlgorithm::Blake3 => blake3_file(path),
    }
}

fn digest_file<D: Digest>(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::with_capacity(BUF_SIZE, File::open(path)?);
    let mut hasher = D::new();
    let mut buffer = vec![0u8; BUF_SIZE];

    loop {
        let count = reader.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        hasher.update(&buffer[..count]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// BLAKE3, memory-mapped for larger files.
fn blake3_file(path: &Path) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();

    if std::fs::metadata(path)?.len() >= MMAP_THRESHOLD {
        hasher.update_mmap(path)?;
    } else {
        let mut reader = BufReader::with_capacity(BUF_SIZE, File::open(path)?);
        let mut buffer = vec![0u8; BUF_SIZE];
        loop {
            let count = reader.read(&mut buffer)?;
            if count == 0 {
                break;
            }
            hasher.update(&buffer[..count]);
        }
    }

    Ok(hasher.finalize().to_hex().to_string())
}

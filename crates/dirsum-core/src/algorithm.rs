//! Digest algorithm selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::ScanError;

/// Supported digest algorithms.
///
/// Identifiers parse case-insensitively from their lowercase names
/// (`"sha256"`, `"blake3"`, ...). Unknown identifiers are rejected up front
/// via [`HashAlgorithm::parse`] rather than failing per file.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha512,
    Blake2b,
    Blake3,
}

impl HashAlgorithm {
    /// Parse an algorithm identifier.
    ///
    /// Rejecting unknown names here keeps a bad identifier from silently
    /// producing an all-null manifest later.
    pub fn parse(name: &str) -> Result<Self, ScanError> {
        name.parse().map_err(|_| ScanError::UnsupportedAlgorithm {
            name: name.to_string(),
        })
    }

    /// All supported identifiers, for help text and error messages.
    pub fn supported() -> Vec<&'static str> {
        Self::iter().map(Into::into).collect()
    }

    /// Length of the hex-encoded digest in characters.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 | Self::Blake3 => 64,
            Self::Sha512 | Self::Blake2b => 128,
        }
    }
}

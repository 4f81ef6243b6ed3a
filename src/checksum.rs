//! Checksum types and the per-locator fingerprint index.
//!
//! The content analyzer produces one [`FingerprintIndex`] per locator:
//! a mapping from checksum type to digest value to the local files
//! inside the archive sharing that digest. The index is read-only once
//! produced; the orchestration core only carries it between the two
//! pipeline stages.

use std::collections::BTreeMap;

/// Hash algorithm used to fingerprint archive contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChecksumType {
    Md5,
    Sha1,
    Sha256,
}

impl ChecksumType {
    /// All supported checksum types, in canonical order.
    pub const ALL: [ChecksumType; 3] = [Self::Md5, Self::Sha1, Self::Sha256];

    /// Returns the lowercase algorithm name used in logs and wire forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for ChecksumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file found inside a deliverable archive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalFile {
    /// Path of the file within the archive.
    pub filename: String,
    /// Uncompressed size in bytes.
    pub size: u64,
}

impl LocalFile {
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            size,
        }
    }
}

/// Per-locator mapping of checksum type → digest → matching local files.
///
/// Produced once by the content analyzer, then consumed read-only by the
/// build matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintIndex {
    entries: BTreeMap<ChecksumType, BTreeMap<String, Vec<LocalFile>>>,
}

impl FingerprintIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `file` has the given digest under `checksum_type`.
    ///
    /// Multiple files may share a digest; insertion order is preserved
    /// within a digest's file list.
    pub fn insert(&mut self, checksum_type: ChecksumType, digest: impl Into<String>, file: LocalFile) {
        self.entries
            .entry(checksum_type)
            .or_default()
            .entry(digest.into())
            .or_default()
            .push(file);
    }

    /// Returns the files recorded for a digest, if any.
    pub fn files_for(&self, checksum_type: ChecksumType, digest: &str) -> Option<&[LocalFile]> {
        self.entries
            .get(&checksum_type)
            .and_then(|digests| digests.get(digest))
            .map(Vec::as_slice)
    }

    /// Iterates the digests recorded under one checksum type.
    pub fn digests(&self, checksum_type: ChecksumType) -> impl Iterator<Item = &str> {
        self.entries
            .get(&checksum_type)
            .into_iter()
            .flat_map(|digests| digests.keys().map(String::as_str))
    }

    /// Number of checksum types present in the index.
    pub fn checksum_type_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of distinct digests across all checksum types.
    pub fn digest_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no fingerprints were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_type_display() {
        assert_eq!(ChecksumType::Md5.to_string(), "md5");
        assert_eq!(ChecksumType::Sha1.to_string(), "sha1");
        assert_eq!(ChecksumType::Sha256.to_string(), "sha256");
    }

    #[test]
    fn test_index_starts_empty() {
        let index = FingerprintIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.checksum_type_count(), 0);
        assert_eq!(index.digest_count(), 0);
    }

    #[test]
    fn test_index_insert_and_lookup() {
        let mut index = FingerprintIndex::new();
        index.insert(ChecksumType::Sha256, "abc123", LocalFile::new("lib/a.jar", 100));
        index.insert(ChecksumType::Sha256, "abc123", LocalFile::new("lib/b.jar", 100));
        index.insert(ChecksumType::Md5, "def456", LocalFile::new("lib/a.jar", 100));

        let files = index.files_for(ChecksumType::Sha256, "abc123").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "lib/a.jar");
        assert_eq!(files[1].filename, "lib/b.jar");

        assert!(index.files_for(ChecksumType::Sha1, "abc123").is_none());
        assert!(index.files_for(ChecksumType::Sha256, "missing").is_none());

        assert_eq!(index.checksum_type_count(), 2);
        assert_eq!(index.digest_count(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_index_digest_iteration() {
        let mut index = FingerprintIndex::new();
        index.insert(ChecksumType::Sha1, "bbb", LocalFile::new("x", 1));
        index.insert(ChecksumType::Sha1, "aaa", LocalFile::new("y", 2));

        let digests: Vec<&str> = index.digests(ChecksumType::Sha1).collect();
        assert_eq!(digests, vec!["aaa", "bbb"]);

        assert_eq!(index.digests(ChecksumType::Md5).count(), 0);
    }
}

//! Analysis configuration.
//!
//! [`FinderConfig`] carries the per-operation parameters consumed by the
//! content analyzer and the build matcher. The orchestration core only
//! passes it through; interpretation belongs to the collaborators.

use std::collections::BTreeSet;

use crate::checksum::ChecksumType;

/// Parameters for one analysis operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    /// Checksum types the analyzer computes for every file.
    pub checksum_types: BTreeSet<ChecksumType>,
    /// Archive extensions the analyzer recurses into.
    pub archive_extensions: Vec<String>,
    /// Filename patterns excluded from fingerprinting.
    pub excludes: Vec<String>,
}

impl FinderConfig {
    /// Creates a configuration with the default checksum types and
    /// archive extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts fingerprinting to the given checksum types.
    pub fn with_checksum_types(mut self, types: impl IntoIterator<Item = ChecksumType>) -> Self {
        self.checksum_types = types.into_iter().collect();
        self
    }

    /// Replaces the archive extensions the analyzer recurses into.
    pub fn with_archive_extensions(
        mut self,
        extensions: impl IntoIterator<Item = String>,
    ) -> Self {
        self.archive_extensions = extensions.into_iter().collect();
        self
    }

    /// Adds a filename pattern to exclude from fingerprinting.
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            checksum_types: ChecksumType::ALL.into_iter().collect(),
            archive_extensions: ["zip", "tar", "tar.gz", "jar", "war", "ear"]
                .into_iter()
                .map(String::from)
                .collect(),
            excludes: Vec::new(),
        }
    }
}

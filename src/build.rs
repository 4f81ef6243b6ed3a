//! Build records returned by build-tracking services.
//!
//! The orchestration core treats build records as opaque beyond their
//! integer identifier. [`BuildId::NOT_FOUND`] (zero) is the reserved
//! bucket under which the matcher files fingerprints that matched no
//! known build.

use crate::checksum::LocalFile;

/// Integer identifier of a build known to a build-tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildId(u64);

impl BuildId {
    /// Reserved id for the bucket of fingerprints with no known build.
    pub const NOT_FOUND: BuildId = BuildId(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the reserved not-found bucket.
    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One build identified by the matcher as having produced matched files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    /// Identifier of the build within its tracking service.
    pub id: BuildId,
    /// Human-readable build identifier (e.g. name-version-release).
    pub identifier: String,
    /// Which build-tracking backend reported the build.
    pub origin: String,
    /// Files from the analyzed archive attributed to this build.
    pub files: Vec<LocalFile>,
}

impl BuildRecord {
    pub fn new(id: BuildId, identifier: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            id,
            identifier: identifier.into(),
            origin: origin.into(),
            files: Vec::new(),
        }
    }

    /// Attributes a file to this build.
    pub fn add_file(&mut self, file: LocalFile) {
        self.files.push(file);
    }
}

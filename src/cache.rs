//! Shared fingerprint-to-build memoization backend.
//!
//! The cache is an external collaborator handed read-mostly to every
//! concurrently running pipeline of an operation. Implementations must
//! tolerate concurrent use from multiple pipelines without external
//! locking; the orchestration core does not enforce that contract.

use crate::build::BuildId;
use crate::checksum::ChecksumType;

/// Memoizes digest-to-build lookups across operations.
pub trait FingerprintCache: Send + Sync + 'static {
    /// Returns the build ids previously resolved for a digest, if the
    /// lookup was memoized.
    fn get(&self, checksum_type: ChecksumType, digest: &str) -> Option<Vec<BuildId>>;

    /// Memoizes the build ids resolved for a digest.
    fn put(&self, checksum_type: ChecksumType, digest: &str, builds: Vec<BuildId>);
}

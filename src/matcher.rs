//! Build matcher collaborator interface.
//!
//! The matcher resolves the digests of a fingerprint index against one
//! or more build-tracking services and returns the builds it found,
//! keyed by build id. Fingerprints no service recognized are filed
//! under [`BuildId::NOT_FOUND`](crate::build::BuildId::NOT_FOUND).

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use crate::build::{BuildId, BuildRecord};
use crate::cache::FingerprintCache;
use crate::checksum::{ChecksumType, FingerprintIndex};
use crate::config::FinderConfig;
use crate::error::MatchError;
use crate::observer::MatcherObserver;

/// Boxed future returned by [`BuildMatcher::find_builds`].
pub type MatchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<BTreeMap<BuildId, BuildRecord>, MatchError>> + Send + 'a>>;

/// Resolves fingerprints to known builds.
///
/// One matcher instance (and its backend session) is shared by every
/// concurrently running pipeline of an operation; implementations must
/// tolerate concurrent calls without external locking.
pub trait BuildMatcher: Send + Sync + 'static {
    /// Matches the digests in `index` against the build-tracking
    /// backend.
    ///
    /// `secondary`, when present, is an additional build source the
    /// matcher consults after the primary backend. Progress events are
    /// delivered to `observer`.
    fn find_builds<'a>(
        &'a self,
        index: &'a FingerprintIndex,
        config: &'a FinderConfig,
        cache: Option<&'a dyn FingerprintCache>,
        secondary: Option<&'a dyn SecondarySource>,
        observer: &'a dyn MatcherObserver,
    ) -> MatchFuture<'a>;
}

/// Boxed future returned by [`SecondarySource::lookup`].
pub type LookupFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<BuildRecord>, MatchError>> + Send + 'a>>;

/// Optional second build-tracking backend consulted by the matcher.
///
/// The orchestration core only decides whether a secondary source is
/// handed to the matcher; the lookups themselves are opaque to it.
pub trait SecondarySource: Send + Sync + 'static {
    /// Resolves one digest to the builds the secondary backend knows.
    fn lookup<'a>(&'a self, checksum_type: ChecksumType, digest: &'a str) -> LookupFuture<'a>;
}

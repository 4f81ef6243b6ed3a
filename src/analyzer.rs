//! Content analyzer collaborator interface.
//!
//! The analyzer downloads a deliverable archive, unpacks it, and
//! fingerprints every file it contains. How it does that is outside
//! this crate; the orchestration core invokes it through this trait and
//! treats its output as read-only.

use std::future::Future;
use std::pin::Pin;

use crate::cache::FingerprintCache;
use crate::checksum::FingerprintIndex;
use crate::config::FinderConfig;
use crate::error::AnalysisError;
use crate::locator::Locator;
use crate::observer::AnalyzerObserver;

/// Boxed future returned by [`ContentAnalyzer::analyze`].
pub type AnalyzeFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FingerprintIndex, AnalysisError>> + Send + 'a>>;

/// Produces a fingerprint index for one locator.
///
/// Implementations are shared by every concurrently running pipeline of
/// an operation and must tolerate concurrent calls.
pub trait ContentAnalyzer: Send + Sync + 'static {
    /// Downloads and fingerprints the archive at `locator`.
    ///
    /// Progress events are delivered to `observer` as the analysis
    /// proceeds. The optional `cache` is the shared memoization backend
    /// an implementation may consult for previously computed digests.
    fn analyze<'a>(
        &'a self,
        locator: &'a Locator,
        config: &'a FinderConfig,
        cache: Option<&'a dyn FingerprintCache>,
        observer: &'a dyn AnalyzerObserver,
    ) -> AnalyzeFuture<'a>;
}

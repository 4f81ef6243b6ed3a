//! Progress observers for the pipeline stages.
//!
//! Both collaborators emit progress events to a caller-supplied
//! observer while they work. The orchestration core routes the
//! observers through to the collaborators unchanged; it neither
//! produces nor consumes the payloads.

use crate::build::BuildId;
use crate::checksum::ChecksumType;
use crate::locator::Locator;

/// Progress events emitted by the content analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerEvent {
    /// Analysis of a locator has begun.
    Started { locator: Locator },
    /// One file inside the archive was fingerprinted.
    FileFingerprinted {
        filename: String,
        checksum_type: ChecksumType,
        digest: String,
    },
    /// Analysis of a locator finished.
    Finished { locator: Locator, files: usize },
}

/// Progress events emitted by the build matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherEvent {
    /// Matching started over the given number of distinct digests.
    Started { digests: usize },
    /// A digest was resolved to a known build.
    BuildMatched { id: BuildId, identifier: String },
    /// Matching finished.
    Finished { matched: usize, not_found: usize },
}

/// Callback surface invoked by the content analyzer during its work.
pub trait AnalyzerObserver: Send + Sync {
    fn on_event(&self, event: AnalyzerEvent);
}

/// Callback surface invoked by the build matcher during its work.
pub trait MatcherObserver: Send + Sync {
    fn on_event(&self, event: MatcherEvent);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl AnalyzerObserver for NullObserver {
    fn on_event(&self, _event: AnalyzerEvent) {}
}

impl MatcherObserver for NullObserver {
    fn on_event(&self, _event: MatcherEvent) {}
}

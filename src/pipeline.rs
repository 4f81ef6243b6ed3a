//! Per-locator analysis pipeline.
//!
//! One pipeline invocation runs the two stages for a single locator in
//! sequence: content analysis produces a fingerprint index, then build
//! matching resolves the digests against the build-tracking backends.
//! The operation's cancellation token is checked before each stage; a
//! set token terminates the pipeline promptly with a cancellation
//! outcome. Failure at either stage is the task's terminal outcome and
//! is reported through the task handle, never asynchronously.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::analyzer::ContentAnalyzer;
use crate::cache::FingerprintCache;
use crate::config::FinderConfig;
use crate::error::PipelineError;
use crate::locator::Locator;
use crate::matcher::{BuildMatcher, SecondarySource};
use crate::observer::{AnalyzerObserver, MatcherObserver};
use crate::operation::{LocatorResult, OperationId};

/// Shared resources handed to every pipeline invocation of one
/// operation.
///
/// Everything here is read-mostly: the collaborators and the cache must
/// tolerate concurrent use by multiple pipelines, a contract they
/// uphold themselves. The cancellation token is deliberately not part
/// of the context; it is passed per invocation.
pub(crate) struct PipelineContext {
    pub(crate) config: FinderConfig,
    pub(crate) analyzer: Arc<dyn ContentAnalyzer>,
    pub(crate) matcher: Arc<dyn BuildMatcher>,
    pub(crate) cache: Option<Arc<dyn FingerprintCache>>,
    pub(crate) secondary: Option<Arc<dyn SecondarySource>>,
    pub(crate) analyzer_observer: Arc<dyn AnalyzerObserver>,
    pub(crate) matcher_observer: Arc<dyn MatcherObserver>,
}

/// Runs the two-stage pipeline for one locator.
pub(crate) async fn run(
    operation: OperationId,
    locator: Locator,
    ctx: Arc<PipelineContext>,
    token: CancellationToken,
) -> Result<LocatorResult, PipelineError> {
    let start = Instant::now();
    debug!(operation_id = %operation, locator = %locator, "Pipeline started");

    if token.is_cancelled() {
        return Err(PipelineError::Cancelled { locator });
    }

    // Stage 1: fingerprint the archive contents.
    let index = ctx
        .analyzer
        .analyze(
            &locator,
            &ctx.config,
            ctx.cache.as_deref(),
            ctx.analyzer_observer.as_ref(),
        )
        .await
        .map_err(|source| PipelineError::Analysis {
            locator: locator.clone(),
            source,
        })?;

    debug!(
        operation_id = %operation,
        locator = %locator,
        checksum_types = index.checksum_type_count(),
        digests = index.digest_count(),
        "Content analysis finished"
    );

    if token.is_cancelled() {
        return Err(PipelineError::Cancelled { locator });
    }

    // Stage 2: resolve the fingerprints to known builds.
    if ctx.secondary.is_none() {
        warn!(
            operation_id = %operation,
            "Matching without a secondary build source; none configured"
        );
    }

    let builds = ctx
        .matcher
        .find_builds(
            &index,
            &ctx.config,
            ctx.cache.as_deref(),
            ctx.secondary.as_deref(),
            ctx.matcher_observer.as_ref(),
        )
        .await
        .map_err(|source| PipelineError::Matching {
            locator: locator.clone(),
            source,
        })?;

    info!(
        operation_id = %operation,
        locator = %locator,
        builds = builds.len(),
        duration_ms = start.elapsed().as_millis(),
        "Done finding builds for locator"
    );

    Ok(LocatorResult::from_builds(operation, locator, builds))
}

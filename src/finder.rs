//! Operation lifecycle facade.
//!
//! [`Finder`] owns the operation registry and the shared collaborators,
//! and exposes the two-call lifecycle API consumed by a transport
//! layer:
//!
//! - [`Finder::find`] runs one cancellable operation across a list of
//!   locators and resolves only when the operation reaches a terminal
//!   state (all succeeded, first failure, or cancellation).
//! - [`Finder::cancel`] requests cancellation of a running operation by
//!   id.
//!
//! Work fans out onto the tokio runtime, one task per locator, bounded
//! by runtime capacity rather than locator count. The awaiter joins the
//! tasks wake-on-completion instead of polling, so cancellation and
//! fail-fast latency is not floored by a sleep interval.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::analyzer::ContentAnalyzer;
use crate::cache::FingerprintCache;
use crate::config::FinderConfig;
use crate::error::{FinderError, PipelineError};
use crate::locator::Locator;
use crate::matcher::{BuildMatcher, SecondarySource};
use crate::observer::{AnalyzerObserver, MatcherObserver};
use crate::operation::{LocatorResult, OperationId, OperationResult};
use crate::pipeline::{self, PipelineContext};
use crate::registry::OperationRegistry;

/// Outcome type carried by each pipeline task handle.
type PipelineTasks = JoinSet<Result<LocatorResult, PipelineError>>;

/// Removes an operation's registry entry when dropped.
///
/// [`Finder::find`] holds one of these for the lifetime of the
/// operation so unregistration covers every terminal path, including
/// the caller dropping the `find` future mid-flight (e.g. a transport
/// timeout). Dropping the future aborts the pipelines; the guard keeps
/// the registry from leaking the entry.
struct RegistrationGuard<'a> {
    registry: &'a OperationRegistry,
    id: &'a OperationId,
}

impl Drop for RegistrationGuard<'_> {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}

/// Orchestrates cancellable analysis operations.
///
/// The finder and its collaborators are shared across operations;
/// wrap it in an [`Arc`] to call [`Finder::cancel`] from a different
/// task than the one blocked in [`Finder::find`].
pub struct Finder {
    registry: OperationRegistry,
    analyzer: Arc<dyn ContentAnalyzer>,
    matcher: Arc<dyn BuildMatcher>,
    cache: Option<Arc<dyn FingerprintCache>>,
    secondary: Option<Arc<dyn SecondarySource>>,
}

impl Finder {
    /// Creates a finder with the given collaborators and no cache or
    /// secondary build source.
    pub fn new(analyzer: Arc<dyn ContentAnalyzer>, matcher: Arc<dyn BuildMatcher>) -> Self {
        Self {
            registry: OperationRegistry::new(),
            analyzer,
            matcher,
            cache: None,
            secondary: None,
        }
    }

    /// Attaches the shared fingerprint cache backend.
    pub fn with_cache(mut self, cache: Arc<dyn FingerprintCache>) -> Self {
        info!("Fingerprint cache attached");
        self.cache = Some(cache);
        self
    }

    /// Attaches a secondary build source consulted by the matcher.
    pub fn with_secondary_source(mut self, secondary: Arc<dyn SecondarySource>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Runs one analysis operation across `locators`.
    ///
    /// The call resolves only when the operation reaches a terminal
    /// state. Exactly one of three outcomes is returned:
    ///
    /// - `Ok` with one [`LocatorResult`] per locator, in task
    ///   completion order, when every pipeline succeeded;
    /// - the first pipeline error, verbatim, with all other in-flight
    ///   pipelines signalled to cancel;
    /// - [`FinderError::Cancelled`] if [`Finder::cancel`] was called
    ///   for `id` while work was in flight.
    ///
    /// Partial results are never returned. An empty locator list
    /// yields an empty result without submitting any task. Registering
    /// an id that is still running fails with
    /// [`FinderError::DuplicateOperation`] before any work starts.
    pub async fn find(
        &self,
        id: OperationId,
        locators: Vec<Locator>,
        config: FinderConfig,
        analyzer_observer: Arc<dyn AnalyzerObserver>,
        matcher_observer: Arc<dyn MatcherObserver>,
    ) -> Result<OperationResult, FinderError> {
        let token = self.registry.register(&id)?;

        // Unregisters on every terminal path, including abandonment of
        // this future.
        let _guard = RegistrationGuard {
            registry: &self.registry,
            id: &id,
        };

        info!(
            operation_id = %id,
            locators = locators.len(),
            cache = self.cache.is_some(),
            secondary_source = self.secondary.is_some(),
            "Starting analysis operation"
        );

        let ctx = Arc::new(PipelineContext {
            config,
            analyzer: Arc::clone(&self.analyzer),
            matcher: Arc::clone(&self.matcher),
            cache: self.cache.clone(),
            secondary: self.secondary.clone(),
            analyzer_observer,
            matcher_observer,
        });

        let tasks = Self::dispatch(&id, locators, &ctx, &token);
        let outcome = Self::await_results(tasks, &token).await;

        match &outcome {
            Ok(results) => {
                info!(operation_id = %id, results = results.len(), "Operation finished");
            }
            Err(FinderError::Cancelled) => {
                info!(operation_id = %id, "Operation was cancelled");
            }
            Err(error) => {
                warn!(operation_id = %id, error = %error, "Operation failed");
            }
        }

        outcome
    }

    /// Requests cancellation of a running operation.
    ///
    /// Returns `true` if a live operation with that id existed and was
    /// signalled, `false` for unknown or already-finished ids.
    /// Cancellation is cooperative: in-flight pipelines terminate at
    /// their next checkpoint and the blocked [`Finder::find`] call
    /// resolves with [`FinderError::Cancelled`].
    pub fn cancel(&self, id: &OperationId) -> bool {
        self.registry.cancel(id)
    }

    /// Number of operations currently running.
    pub fn active_operations(&self) -> usize {
        self.registry.active_count()
    }

    /// Submits one pipeline task per locator onto the runtime.
    ///
    /// Tasks are spawned in submission order; the runtime executes them
    /// in any order and with any degree of parallelism up to its
    /// capacity. Each task encodes failure in its handle's outcome.
    fn dispatch(
        id: &OperationId,
        locators: Vec<Locator>,
        ctx: &Arc<PipelineContext>,
        token: &CancellationToken,
    ) -> PipelineTasks {
        let mut tasks = JoinSet::new();

        for locator in locators {
            debug!(operation_id = %id, locator = %locator, "Submitting pipeline task");

            let id = id.clone();
            let ctx = Arc::clone(ctx);
            let token = token.clone();
            tasks.spawn(async move { pipeline::run(id, locator, ctx, token).await });
        }

        tasks
    }

    /// Joins the pipeline tasks to a terminal outcome.
    ///
    /// Races task completions against the operation's cancellation
    /// token. Returns on the first of: all tasks succeeded, any task
    /// failed, or the token was observed set. On the latter two paths
    /// every incomplete task is signalled to cancel and the join set is
    /// drained before the error is raised; results collected so far are
    /// discarded.
    async fn await_results(
        mut tasks: PipelineTasks,
        token: &CancellationToken,
    ) -> Result<OperationResult, FinderError> {
        let mut results = Vec::with_capacity(tasks.len());

        while !tasks.is_empty() {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    Some(Ok(Ok(result))) => {
                        debug!(
                            locator = %result.locator,
                            completed = results.len() + 1,
                            "Pipeline task completed"
                        );
                        results.push(result);
                    }
                    Some(Ok(Err(PipelineError::Cancelled { .. }))) => {
                        // A pipeline observed the token at a checkpoint
                        // before the awaiter did.
                        return Self::abort_remaining(tasks, token, FinderError::Cancelled).await;
                    }
                    Some(Ok(Err(error))) => {
                        warn!(
                            locator = %error.locator(),
                            error = %error,
                            "Pipeline task failed, aborting operation"
                        );
                        return Self::abort_remaining(tasks, token, error.into()).await;
                    }
                    Some(Err(join_error)) => {
                        let error = FinderError::Internal(join_error.to_string());
                        return Self::abort_remaining(tasks, token, error).await;
                    }
                    None => break,
                },
                _ = token.cancelled() => {
                    return Self::abort_remaining(tasks, token, FinderError::Cancelled).await;
                }
            }
        }

        Ok(results)
    }

    /// Cancels every incomplete task and waits for acknowledgment.
    ///
    /// The token is the primary, cooperative signal; aborting the
    /// handles additionally unblocks tasks suspended inside a
    /// collaborator stage so the drain is bounded by the next await
    /// point rather than the stage's natural duration.
    async fn abort_remaining(
        mut tasks: PipelineTasks,
        token: &CancellationToken,
        error: FinderError,
    ) -> Result<OperationResult, FinderError> {
        info!(pending = tasks.len(), "Cancelling all remaining pipeline tasks");

        token.cancel();
        tasks.abort_all();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(_) => {}
                Err(join_error) if join_error.is_cancelled() => {}
                Err(join_error) => {
                    warn!(error = %join_error, "Pipeline task ended abnormally during abort");
                }
            }
        }

        info!("All remaining pipeline tasks were cancelled");
        Err(error)
    }
}

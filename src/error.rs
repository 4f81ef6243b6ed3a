//! Error types for the analysis orchestration core.
//!
//! Errors are split by origin: [`FinderError`] is what callers of the
//! operation lifecycle API see, [`PipelineError`] is the terminal
//! outcome of one locator's pipeline, and [`AnalysisError`] /
//! [`MatchError`] are the failure surfaces of the external
//! collaborators. Causes are preserved end to end; the first pipeline
//! failure of an operation reaches the caller verbatim.

use thiserror::Error;

use crate::locator::Locator;
use crate::operation::OperationId;

/// Errors surfaced by the operation lifecycle API.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The operation was cancelled by explicit request.
    #[error("operation was cancelled")]
    Cancelled,

    /// An operation with the same id is still running.
    #[error("operation {0} is already running")]
    DuplicateOperation(OperationId),

    /// The first pipeline failure of the operation, surfaced verbatim.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A pipeline task died without producing an outcome.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Terminal failure of one locator's pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The content analyzer failed for this locator.
    #[error("content analysis of {locator} failed: {source}")]
    Analysis {
        locator: Locator,
        #[source]
        source: AnalysisError,
    },

    /// The build matcher failed for this locator.
    #[error("build matching for {locator} failed: {source}")]
    Matching {
        locator: Locator,
        #[source]
        source: MatchError,
    },

    /// The pipeline observed the operation's cancellation token.
    #[error("pipeline for {locator} was cancelled")]
    Cancelled { locator: Locator },
}

impl PipelineError {
    /// The locator whose pipeline produced this error.
    pub fn locator(&self) -> &Locator {
        match self {
            Self::Analysis { locator, .. }
            | Self::Matching { locator, .. }
            | Self::Cancelled { locator } => locator,
        }
    }
}

/// Failures reported by the content analyzer collaborator.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The archive could not be downloaded.
    #[error("download failed: {0}")]
    Download(String),

    /// Reading or unpacking the downloaded content failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The archive content could not be interpreted.
    #[error("malformed content: {0}")]
    MalformedContent(String),
}

/// Failures reported by the build matcher collaborator.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Transport-level problem with a build-tracking backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend replied with something the client could not handle.
    #[error("protocol error: {0}")]
    Protocol(String),
}

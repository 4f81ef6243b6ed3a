//! Deliverable Finder - cancellable analysis of deliverable archives.
//!
//! This library orchestrates the analysis of remotely hosted artifact
//! archives against build-tracking services. Each archive locator runs
//! a two-stage pipeline - content fingerprinting, then matching the
//! fingerprints to known builds - and a whole multi-locator operation
//! is one cancellable unit of work with fail-fast semantics.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use deliverable_finder::config::FinderConfig;
//! use deliverable_finder::finder::Finder;
//! use deliverable_finder::locator::Locator;
//! use deliverable_finder::observer::NullObserver;
//! use deliverable_finder::operation::OperationId;
//!
//! let finder = Arc::new(Finder::new(analyzer, matcher));
//!
//! let results = finder
//!     .find(
//!         OperationId::new("analysis-1"),
//!         vec![Locator::parse("https://example.com/app.zip")?],
//!         FinderConfig::default(),
//!         Arc::new(NullObserver),
//!         Arc::new(NullObserver),
//!     )
//!     .await?;
//!
//! // From another task:
//! finder.cancel(&OperationId::new("analysis-1"));
//! ```
//!
//! The fingerprinting and matching algorithms, the cache backend, and
//! the transport surface are external collaborators consumed through
//! the traits in [`analyzer`], [`matcher`], and [`cache`].

pub mod analyzer;
pub mod build;
pub mod cache;
pub mod checksum;
pub mod config;
pub mod error;
pub mod finder;
pub mod locator;
pub mod logging;
pub mod matcher;
pub mod observer;
pub mod operation;
mod pipeline;
pub mod registry;

/// Version of the deliverable-finder library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

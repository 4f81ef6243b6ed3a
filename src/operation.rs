//! Operation identifiers and result assembly.
//!
//! An operation is one caller-initiated, cancellable unit of work
//! spanning one or more locators. [`LocatorResult::from_builds`] is the
//! result aggregator: a pure function that turns the matcher's raw
//! build map into the per-locator outcome, splitting out the reserved
//! not-found bucket.

use std::collections::BTreeMap;

use crate::build::{BuildId, BuildRecord};
use crate::checksum::LocalFile;
use crate::locator::Locator;

/// Identifier of one analysis operation, unique while it is running.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(String);

impl OperationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one locator's pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorResult {
    /// Operation this result belongs to.
    pub operation: OperationId,
    /// Locator that was analyzed.
    pub locator: Locator,
    /// Matched builds, ordered by build id. Never contains the
    /// not-found bucket.
    pub builds: Vec<BuildRecord>,
    /// Files whose fingerprints matched no known build.
    pub not_found: Vec<LocalFile>,
}

impl LocatorResult {
    /// Assembles a locator result from the matcher's raw build map.
    ///
    /// The [`BuildId::NOT_FOUND`] entry, if present, becomes the
    /// `not_found` file list; the remaining entries keep their build-id
    /// order. Pure function of its inputs.
    pub fn from_builds(
        operation: OperationId,
        locator: Locator,
        mut builds: BTreeMap<BuildId, BuildRecord>,
    ) -> Self {
        let not_found = builds
            .remove(&BuildId::NOT_FOUND)
            .map(|record| record.files)
            .unwrap_or_default();

        Self {
            operation,
            locator,
            builds: builds.into_values().collect(),
            not_found,
        }
    }

    /// Number of matched builds (not counting the not-found bucket).
    pub fn build_count(&self) -> usize {
        self.builds.len()
    }
}

/// Aggregated outcome of one operation, in task completion order.
///
/// Produced only when every locator's pipeline succeeded; a failed or
/// cancelled operation yields its error instead, never a partial list.
pub type OperationResult = Vec<LocatorResult>;

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> Locator {
        Locator::parse("https://example.com/app.zip").unwrap()
    }

    #[test]
    fn test_operation_id_display() {
        let id = OperationId::new("analysis-42");
        assert_eq!(id.to_string(), "analysis-42");
        assert_eq!(id.as_str(), "analysis-42");
    }

    #[test]
    fn test_from_builds_splits_not_found_bucket() {
        let mut builds = BTreeMap::new();

        let mut unmatched = BuildRecord::new(BuildId::NOT_FOUND, "", "");
        unmatched.add_file(LocalFile::new("mystery.jar", 10));
        builds.insert(BuildId::NOT_FOUND, unmatched);

        builds.insert(
            BuildId::new(7),
            BuildRecord::new(BuildId::new(7), "app-1.0-1", "koji"),
        );
        builds.insert(
            BuildId::new(3),
            BuildRecord::new(BuildId::new(3), "lib-2.1-4", "koji"),
        );

        let result = LocatorResult::from_builds(OperationId::new("op"), locator(), builds);

        assert_eq!(result.build_count(), 2);
        assert_eq!(result.builds[0].id, BuildId::new(3));
        assert_eq!(result.builds[1].id, BuildId::new(7));
        assert_eq!(result.not_found.len(), 1);
        assert_eq!(result.not_found[0].filename, "mystery.jar");
    }

    #[test]
    fn test_from_builds_without_not_found_bucket() {
        let mut builds = BTreeMap::new();
        builds.insert(
            BuildId::new(1),
            BuildRecord::new(BuildId::new(1), "app-1.0-1", "koji"),
        );

        let result = LocatorResult::from_builds(OperationId::new("op"), locator(), builds);

        assert_eq!(result.build_count(), 1);
        assert!(result.not_found.is_empty());
    }

    #[test]
    fn test_from_builds_empty_map() {
        let result = LocatorResult::from_builds(OperationId::new("op"), locator(), BTreeMap::new());
        assert_eq!(result.build_count(), 0);
        assert!(result.not_found.is_empty());
    }
}

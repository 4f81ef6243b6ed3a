//! Registry of running operations.
//!
//! The registry is the only persistent shared state of the
//! orchestration core: a concurrency-safe table mapping an operation id
//! to its live cancellation token. Entries are created when an
//! operation starts and removed on every terminal path, so membership
//! doubles as the "is this operation still running" predicate for
//! cancellation requests.
//!
//! Nothing survives a process restart; an in-flight operation's token
//! becomes unreachable if the process dies.

use std::sync::Arc;
use std::time::Instant;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::FinderError;
use crate::operation::OperationId;

/// One registered operation.
struct OperationEntry {
    /// Write-once cancellation token shared with every pipeline task
    /// of the operation.
    token: CancellationToken,
    /// When the operation was registered.
    started_at: Instant,
}

impl OperationEntry {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            started_at: Instant::now(),
        }
    }
}

/// Concurrency-safe table of running operations.
///
/// Safe for concurrent registration, cancellation, and unregistration
/// from independent tasks without external locking.
#[derive(Default)]
pub struct OperationRegistry {
    operations: DashMap<OperationId, Arc<OperationEntry>>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh cancellation token for `id`.
    ///
    /// Fails with [`FinderError::DuplicateOperation`] if an operation
    /// with the same id is still registered; the existing operation's
    /// token is left untouched.
    pub fn register(&self, id: &OperationId) -> Result<CancellationToken, FinderError> {
        match self.operations.entry(id.clone()) {
            Entry::Occupied(_) => Err(FinderError::DuplicateOperation(id.clone())),
            Entry::Vacant(vacant) => {
                let entry = Arc::new(OperationEntry::new());
                let token = entry.token.clone();
                vacant.insert(entry);

                debug!(operation_id = %id, "Registered operation");
                Ok(token)
            }
        }
    }

    /// Sets the cancellation token for `id` if the operation is live.
    ///
    /// Returns whether a live operation was found. Cancelling an
    /// unknown or already-finished id is a no-op, never an error.
    pub fn cancel(&self, id: &OperationId) -> bool {
        match self.operations.get(id) {
            Some(entry) => {
                entry.token.cancel();
                debug!(operation_id = %id, "Cancellation requested");
                true
            }
            None => false,
        }
    }

    /// Removes the entry for `id` unconditionally.
    ///
    /// Called exactly once on every terminal path of an operation.
    pub fn unregister(&self, id: &OperationId) {
        if let Some((_, entry)) = self.operations.remove(id) {
            debug!(
                operation_id = %id,
                elapsed_ms = entry.started_at.elapsed().as_millis(),
                "Unregistered operation"
            );
        }
    }

    /// Returns true if an operation with `id` is currently registered.
    pub fn is_registered(&self, id: &OperationId) -> bool {
        self.operations.contains_key(id)
    }

    /// Number of currently registered operations.
    pub fn active_count(&self) -> usize {
        self.operations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> OperationId {
        OperationId::new(s)
    }

    #[test]
    fn test_register_and_unregister() {
        let registry = OperationRegistry::new();

        let token = registry.register(&id("op-1")).unwrap();
        assert!(!token.is_cancelled());
        assert!(registry.is_registered(&id("op-1")));
        assert_eq!(registry.active_count(), 1);

        registry.unregister(&id("op-1"));
        assert!(!registry.is_registered(&id("op-1")));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let registry = OperationRegistry::new();

        let original = registry.register(&id("op-1")).unwrap();
        let err = registry.register(&id("op-1")).unwrap_err();
        assert!(matches!(err, FinderError::DuplicateOperation(dup) if dup == id("op-1")));

        // The original operation's token is not orphaned by the
        // rejected attempt.
        assert!(registry.cancel(&id("op-1")));
        assert!(original.is_cancelled());
    }

    #[test]
    fn test_id_reusable_after_termination() {
        let registry = OperationRegistry::new();

        let first = registry.register(&id("op-1")).unwrap();
        registry.unregister(&id("op-1"));

        let second = registry.register(&id("op-1")).unwrap();
        // A fresh registration gets a fresh token.
        assert!(!second.is_cancelled());
        assert!(!first.is_cancelled());
    }

    #[test]
    fn test_cancel_live_operation() {
        let registry = OperationRegistry::new();
        let token = registry.register(&id("op-1")).unwrap();

        assert!(registry.cancel(&id("op-1")));
        assert!(token.is_cancelled());

        // Still registered until the awaiter unregisters it; a second
        // cancel still reports a live operation.
        assert!(registry.cancel(&id("op-1")));
    }

    #[test]
    fn test_cancel_unknown_operation_returns_false() {
        let registry = OperationRegistry::new();
        assert!(!registry.cancel(&id("never-registered")));

        registry.register(&id("op-1")).unwrap();
        registry.unregister(&id("op-1"));
        assert!(!registry.cancel(&id("op-1")));
    }

    #[test]
    fn test_concurrent_registration_of_distinct_ids() {
        let registry = Arc::new(OperationRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.register(&id(&format!("op-{i}"))).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.active_count(), 16);
    }

    #[test]
    fn test_concurrent_registration_of_same_id() {
        let registry = Arc::new(OperationRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.register(&id("contended")).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();

        // Exactly one registration wins; the rest see the duplicate.
        assert_eq!(winners, 1);
        assert_eq!(registry.active_count(), 1);
    }
}

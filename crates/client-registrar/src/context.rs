//! # Application Context
//!
//! This module defines [`AppContext`], the per-scope object that owns
//! decorations and may inherit them from an ancestor scope.
//!
//! # Architecture Note
//! The source of truth for "what has been registered" is never ambient
//! global state. Each scope holds its own decoration table plus a reference
//! to its parent, so lookups walk the chain explicitly (own fields first,
//! then ancestors). Sibling scopes share nothing unless a common ancestor
//! was decorated before they branched.
//!
//! **Concurrency Model**:
//! Rust hosts are preemptively threaded, so a registration's existence check
//! and its insertion must not interleave with another registration's. Every
//! scope in a tree shares one registration lock (created at the root,
//! inherited by `child()`); the registrar holds it across its whole
//! check-and-insert sequence. The decoration table itself has a second,
//! short-lived mutex so that plain reads never contend with registrations.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::DecorateError;

/// A type-erased decoration value.
///
/// Integrations store their [`Namespace`](crate::Namespace) here and
/// downcast it back out via [`AppContext::lookup_as`].
pub type Decoration = Arc<dyn Any + Send + Sync>;

struct ContextInner {
    parent: Option<AppContext>,
    decorations: Mutex<HashMap<&'static str, Decoration>>,
    /// Shared by every scope in the tree; held across check-and-insert.
    registration_lock: Arc<Mutex<()>>,
}

/// The application-context instance: a scope that owns decorations and
/// inherits its ancestors' decorations by reference.
///
/// Cheap to clone; clones refer to the same scope.
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<ContextInner>,
}

impl AppContext {
    /// Creates a new root scope with an empty decoration table.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                parent: None,
                decorations: Mutex::new(HashMap::new()),
                registration_lock: Arc::new(Mutex::new(())),
            }),
        }
    }

    /// Creates a child scope.
    ///
    /// The child sees every decoration of its ancestors by reference: a
    /// namespace decorated on the parent is observable (and mutable, for
    /// named entries) from the child, while decorations introduced on the
    /// child stay invisible to the parent and to sibling branches.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                parent: Some(self.clone()),
                decorations: Mutex::new(HashMap::new()),
                registration_lock: Arc::clone(&self.inner.registration_lock),
            }),
        }
    }

    /// Introduces a new top-level field on this scope.
    ///
    /// Fails loudly with [`DecorateError`] if `key` is already an own field
    /// of this scope. An inherited field of the same name does *not* block
    /// decoration here; shadowing checks are the caller's concern (the
    /// registrar performs them against the full chain before decorating).
    pub fn decorate(&self, key: &'static str, value: Decoration) -> Result<(), DecorateError> {
        let mut decorations = lock(&self.inner.decorations);
        if decorations.contains_key(key) {
            return Err(DecorateError { key });
        }
        decorations.insert(key, value);
        debug!(key, "Decorated scope");
        Ok(())
    }

    /// Looks up a decoration by key, walking the scope chain: own fields
    /// first, then each ancestor in turn.
    pub fn lookup(&self, key: &str) -> Option<Decoration> {
        let mut scope = Some(self);
        while let Some(ctx) = scope {
            if let Some(found) = lock(&ctx.inner.decorations).get(key) {
                return Some(Arc::clone(found));
            }
            scope = ctx.inner.parent.as_ref();
        }
        None
    }

    /// Typed variant of [`lookup`](Self::lookup): downcasts the decoration
    /// to `T`, returning `None` both when the key is absent and when it
    /// holds a value of a different type.
    pub fn lookup_as<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.lookup(key).and_then(|d| d.downcast::<T>().ok())
    }

    /// Whether `key` is an own field of this scope (ancestors not
    /// consulted).
    pub fn has_own(&self, key: &str) -> bool {
        lock(&self.inner.decorations).contains_key(key)
    }

    /// Acquires the tree-wide registration lock.
    ///
    /// The registrar holds the returned guard across its entire
    /// validate-then-mutate sequence; there is no await point while it is
    /// held.
    pub(crate) fn registration_guard(&self) -> MutexGuard<'_, ()> {
        lock(&self.inner.registration_lock)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&'static str> = lock(&self.inner.decorations).keys().copied().collect();
        f.debug_struct("AppContext")
            .field("own_decorations", &keys)
            .field("has_parent", &self.inner.parent.is_some())
            .finish()
    }
}

/// Locks a mutex, recovering the data if a holder panicked. The tables
/// guarded here are always left consistent between operations.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

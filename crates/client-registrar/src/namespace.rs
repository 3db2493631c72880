//! # Client Namespace
//!
//! The value an integration stores under its decoration key. It takes one
//! of two shapes, mirroring the two registration modes:
//!
//! - **Default mode**: the namespace *is* the client handle; members of the
//!   client are reached directly through [`Namespace::default_client`].
//! - **Named mode**: the namespace is a name → handle map; handles are
//!   reached through [`Namespace::named`].
//!
//! Once a namespace exists in either shape, the other mode can no longer
//! claim the same decoration key. That exclusion is enforced by the
//! registrar; this type only reports which shape it has.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Outcome of [`Namespace::try_insert`], mapped by the registrar onto the
/// public error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InsertRejected {
    /// The namespace holds a default handle; named entries cannot coexist.
    DefaultOccupied,
    /// The name is already present in the map.
    AlreadyNamed,
}

enum Repr<C> {
    Default(Arc<C>),
    Named(Mutex<HashMap<String, Arc<C>>>),
}

/// One integration's namespace: either the client handle itself or a
/// mutable map of named handles.
pub struct Namespace<C> {
    repr: Repr<C>,
}

impl<C> Namespace<C> {
    /// Creates a default-mode namespace holding `client` itself.
    pub(crate) fn default_instance(client: Arc<C>) -> Self {
        Self {
            repr: Repr::Default(client),
        }
    }

    /// Creates an empty named-mode namespace.
    pub(crate) fn named_map() -> Self {
        Self {
            repr: Repr::Named(Mutex::new(HashMap::new())),
        }
    }

    /// Inserts a named handle, refusing duplicates and default-occupied
    /// namespaces. Contains-check and insert happen under the inner lock.
    pub(crate) fn try_insert(&self, name: &str, client: Arc<C>) -> Result<(), InsertRejected> {
        match &self.repr {
            Repr::Default(_) => Err(InsertRejected::DefaultOccupied),
            Repr::Named(entries) => {
                let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
                if entries.contains_key(name) {
                    return Err(InsertRejected::AlreadyNamed);
                }
                entries.insert(name.to_owned(), client);
                Ok(())
            }
        }
    }

    /// The default handle, if this namespace was registered in default mode.
    pub fn default_client(&self) -> Option<Arc<C>> {
        match &self.repr {
            Repr::Default(client) => Some(Arc::clone(client)),
            Repr::Named(_) => None,
        }
    }

    /// The handle registered under `name`, if any.
    pub fn named(&self, name: &str) -> Option<Arc<C>> {
        match &self.repr {
            Repr::Default(_) => None,
            Repr::Named(entries) => entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(name)
                .cloned(),
        }
    }

    /// All registered instance names, unordered. Empty in default mode.
    pub fn names(&self) -> Vec<String> {
        match &self.repr {
            Repr::Default(_) => Vec::new(),
            Repr::Named(entries) => entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .keys()
                .cloned()
                .collect(),
        }
    }

    /// Whether this namespace holds named entries (as opposed to a single
    /// default handle).
    pub fn is_named(&self) -> bool {
        matches!(self.repr, Repr::Named(_))
    }
}

impl<C> std::fmt::Debug for Namespace<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.repr {
            Repr::Default(_) => f.write_str("Namespace::Default"),
            Repr::Named(_) => f
                .debug_struct("Namespace::Named")
                .field("names", &self.names())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_map_accepts_distinct_names_only() {
        let ns: Namespace<u32> = Namespace::named_map();
        ns.try_insert("eu", Arc::new(1)).unwrap();
        ns.try_insert("us", Arc::new(2)).unwrap();
        assert_eq!(
            ns.try_insert("eu", Arc::new(3)),
            Err(InsertRejected::AlreadyNamed)
        );

        assert_eq!(ns.named("eu").as_deref(), Some(&1));
        assert_eq!(ns.named("us").as_deref(), Some(&2));
        assert!(ns.default_client().is_none());
    }

    #[test]
    fn default_instance_refuses_named_entries() {
        let ns = Namespace::default_instance(Arc::new(9u32));
        assert_eq!(
            ns.try_insert("eu", Arc::new(1)),
            Err(InsertRejected::DefaultOccupied)
        );
        assert_eq!(ns.default_client().as_deref(), Some(&9));
        assert!(!ns.is_named());
        assert!(ns.names().is_empty());
    }
}

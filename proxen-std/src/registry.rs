//! Callback registry.

use proxen_core::Callback;
use std::sync::Arc;

/// An ordered, index-addressable set of callbacks.
///
/// Immutable once built; clones share the same storage.
#[derive(Clone, Debug)]
pub struct CallbackRegistry {
    callbacks: Arc<[Callback]>,
}

impl CallbackRegistry {
    /// A registry holding a single callback.
    pub fn single(callback: Callback) -> Self {
        Self::from(vec![callback])
    }

    /// Number of callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` if no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// The callback at `index`.
    pub fn get(&self, index: usize) -> Option<&Callback> {
        self.callbacks.get(index)
    }

    /// Iterate over the callbacks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Callback> {
        self.callbacks.iter()
    }

    /// Index of the first callback sharing behavior with `callback`.
    pub fn position(&self, callback: &Callback) -> Option<usize> {
        self.callbacks.iter().position(|c| c.same_as(callback))
    }
}

impl From<Vec<Callback>> for CallbackRegistry {
    fn from(callbacks: Vec<Callback>) -> Self {
        Self {
            callbacks: callbacks.into(),
        }
    }
}

impl FromIterator<Callback> for CallbackRegistry {
    fn from_iter<I: IntoIterator<Item = Callback>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Builder for constructing a [`CallbackRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    callbacks: Vec<Callback>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback at the next index.
    pub fn register(mut self, callback: Callback) -> Self {
        self.callbacks.push(callback);
        self
    }

    /// Build the registry.
    pub fn build(self) -> CallbackRegistry {
        CallbackRegistry::from(self.callbacks)
    }
}

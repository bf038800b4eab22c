//! PHF-based routing policy.
//!
//! Requires the `phf` feature.

use proxen_core::{MethodDescriptor, RoutingPolicy};

/// A name-keyed policy backed by a compile-time perfect hash map.
///
/// Unlike [`NamePolicy`](super::NamePolicy), the table is `'static` and
/// immutable.
///
/// # Example
///
/// ```rust,ignore
/// static ROUTES: phf::Map<&'static str, usize> = phf::phf_map! {
///     "test" => 0,
/// };
/// let policy = StaticNamePolicy::new(&ROUTES, 1);
/// ```
#[derive(Clone, Copy)]
pub struct StaticNamePolicy {
    map: &'static phf::Map<&'static str, usize>,
    fallback: usize,
}

impl StaticNamePolicy {
    /// Create a policy from a static map, sending unlisted methods to `fallback`.
    pub const fn new(map: &'static phf::Map<&'static str, usize>, fallback: usize) -> Self {
        Self { map, fallback }
    }
}

impl RoutingPolicy for StaticNamePolicy {
    fn accept(&self, method: &MethodDescriptor) -> usize {
        self.map.get(method.name()).copied().unwrap_or(self.fallback)
    }
}

//! Name-keyed routing policy.

use proxen_core::{MethodDescriptor, RoutingPolicy};
use std::collections::HashMap;

/// Routes methods by name, sending everything else to a fallback index.
///
/// ```rust,ignore
/// // `test` runs the base implementation, everything else a fixed value.
/// let policy = NamePolicy::new(1).route("test", 0);
/// ```
#[derive(Debug, Clone)]
pub struct NamePolicy {
    routes: HashMap<String, usize>,
    declared_only: bool,
    fallback: usize,
}

impl NamePolicy {
    /// Create a policy routing every method to `fallback`.
    pub fn new(fallback: usize) -> Self {
        Self {
            routes: HashMap::new(),
            declared_only: false,
            fallback,
        }
    }

    /// Route every method called `name` to `index`.
    pub fn route(mut self, name: impl Into<String>, index: usize) -> Self {
        self.routes.insert(name.into(), index);
        self
    }

    /// Only apply the routes to methods the base type declares itself;
    /// inherited root-object methods always take the fallback.
    pub fn declared_only(mut self) -> Self {
        self.declared_only = true;
        self
    }

    /// Number of explicit routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if there are no explicit routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RoutingPolicy for NamePolicy {
    fn accept(&self, method: &MethodDescriptor) -> usize {
        if self.declared_only && method.is_inherited() {
            return self.fallback;
        }
        self.routes
            .get(method.name())
            .copied()
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxen_core::{ReturnKind, TypeDescriptor};

    fn test_class() -> TypeDescriptor {
        TypeDescriptor::class("TestClass")
            .method("test", ReturnKind::Text, 0)
            .method("test", ReturnKind::Text, 1)
            .method("delegate", ReturnKind::Text, 0)
            .method("to_string", ReturnKind::Text, 1)
            .build()
    }

    #[test]
    fn routes_by_name_with_fallback() {
        let ty = test_class();
        let policy = NamePolicy::new(1).route("test", 0);

        assert_eq!(policy.accept(ty.find("test", 0).unwrap()), 0);
        assert_eq!(policy.accept(ty.find("test", 1).unwrap()), 0);
        assert_eq!(policy.accept(ty.find("delegate", 0).unwrap()), 1);
        assert_eq!(policy.accept(ty.find("hash_code", 0).unwrap()), 1);
    }

    #[test]
    fn declared_only_skips_inherited_methods() {
        let ty = test_class();
        let policy = NamePolicy::new(0).route("to_string", 1).declared_only();

        // to_string/1 is declared, to_string/0 is inherited.
        assert_eq!(policy.accept(ty.find("to_string", 1).unwrap()), 1);
        assert_eq!(policy.accept(ty.find("to_string", 0).unwrap()), 0);
    }
}

//! Per-method callback selection.

use crate::registry::CallbackRegistry;
use proxen_core::{Callback, MethodDescriptor, RoutingPolicy, TypeDescriptor};
use std::{collections::HashMap, sync::Arc};

/// Method name to `(arity, callback index)` pairs.
type Routes = HashMap<Arc<str>, Vec<(usize, usize)>>;

/// Builds a callback registry and its routing policy from one selector.
///
/// The selector is asked once for every method of the type. Callbacks that
/// share behavior (every `NoOp`, clones of the same callback) share an index,
/// so the selector can keep interceptors specialized while the dispatching
/// logic stays in one place.
///
/// ```rust,ignore
/// let helper = CallbackHelper::new(&descriptor, |method| {
///     if !method.is_inherited() && method.returns() == ReturnKind::Text {
///         Callback::fixed("Hello proxy!")
///     } else {
///         Callback::NoOp
///     }
/// });
/// let (callbacks, policy) = helper.into_parts();
/// ```
pub struct CallbackHelper {
    callbacks: Vec<Callback>,
    routes: Routes,
}

impl CallbackHelper {
    /// Ask `select` for the callback of every method of `descriptor`.
    pub fn new<F>(descriptor: &TypeDescriptor, mut select: F) -> Self
    where
        F: FnMut(&MethodDescriptor) -> Callback,
    {
        let mut callbacks: Vec<Callback> = Vec::new();
        let mut routes = Routes::new();

        for method in descriptor.methods() {
            let callback = select(method);
            let index = match callbacks.iter().position(|c| c.same_as(&callback)) {
                Some(index) => index,
                None => {
                    callbacks.push(callback);
                    callbacks.len() - 1
                }
            };
            routes
                .entry(Arc::from(method.name()))
                .or_default()
                .push((method.arity(), index));
        }

        Self { callbacks, routes }
    }

    /// The deduplicated callbacks, in first-selected order.
    pub fn callbacks(&self) -> CallbackRegistry {
        CallbackRegistry::from(self.callbacks.clone())
    }

    /// The policy routing each method to its selected callback.
    pub fn policy(&self) -> HelperPolicy {
        HelperPolicy {
            routes: Arc::new(self.routes.clone()),
        }
    }

    /// Split into registry and policy.
    pub fn into_parts(self) -> (CallbackRegistry, HelperPolicy) {
        let policy = HelperPolicy {
            routes: Arc::new(self.routes),
        };
        (CallbackRegistry::from(self.callbacks), policy)
    }
}

/// Routing policy produced by [`CallbackHelper`].
///
/// Methods the helper never saw are routed to `usize::MAX`, which fails at
/// call time as a routing error.
#[derive(Debug, Clone)]
pub struct HelperPolicy {
    routes: Arc<Routes>,
}

impl RoutingPolicy for HelperPolicy {
    fn accept(&self, method: &MethodDescriptor) -> usize {
        self.routes
            .get(method.name())
            .and_then(|arities| arities.iter().find(|(arity, _)| *arity == method.arity()))
            .map_or(usize::MAX, |&(_, index)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxen_core::ReturnKind;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class("TestClass")
            .method("test", ReturnKind::Text, 0)
            .method("test", ReturnKind::Text, 1)
            .method("get_something", ReturnKind::Object, 0)
            .build()
    }

    #[test]
    fn identical_callbacks_share_an_index() {
        let fixed = Callback::fixed("Hello proxy!");
        let helper = CallbackHelper::new(&descriptor(), |method| {
            if !method.is_inherited() && method.returns() == ReturnKind::Text {
                fixed.clone()
            } else {
                Callback::NoOp
            }
        });
        let (callbacks, policy) = helper.into_parts();
        let ty = descriptor();

        assert_eq!(callbacks.len(), 2);
        assert_eq!(policy.accept(ty.find("test", 0).unwrap()), 0);
        assert_eq!(policy.accept(ty.find("test", 1).unwrap()), 0);
        assert_eq!(policy.accept(ty.find("get_something", 0).unwrap()), 1);
        assert_eq!(policy.accept(ty.find("hash_code", 0).unwrap()), 1);
    }

    #[test]
    fn unseen_methods_route_out_of_range() {
        let helper = CallbackHelper::new(&descriptor(), |_| Callback::NoOp);
        let policy = helper.policy();
        let stranger = MethodDescriptor::new("Other", "stranger", ReturnKind::Void, 0);

        assert_eq!(helper.callbacks().len(), 1);
        assert_eq!(policy.accept(&stranger), usize::MAX);
    }
}

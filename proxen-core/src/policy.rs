//! Routing policies.
//!
//! A [`RoutingPolicy`] maps a method to the index of the callback that serves
//! it. It is consulted once per intercepted call and must be pure.

use crate::method::MethodDescriptor;

/// Selects the callback for a method.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a routing policy",
    label = "missing `RoutingPolicy` implementation",
    note = "Closures `Fn(&MethodDescriptor) -> usize` are routing policies."
)]
pub trait RoutingPolicy: Send + Sync + 'static {
    /// Index into the callback registry for `method`.
    fn accept(&self, method: &MethodDescriptor) -> usize;
}

impl<F> RoutingPolicy for F
where
    F: Fn(&MethodDescriptor) -> usize + Send + Sync + 'static,
{
    fn accept(&self, method: &MethodDescriptor) -> usize {
        (self)(method)
    }
}

/// Routes every method to the first callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleCallback;

impl RoutingPolicy for SingleCallback {
    fn accept(&self, _method: &MethodDescriptor) -> usize {
        0
    }
}

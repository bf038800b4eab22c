//! # Callbacks
//!
//! A [`Callback`] is the behavior a proxy substitutes for (or wraps around) a
//! method of its base type. The routing policy picks one callback per call;
//! the router then branches once on the variant.
//!
//! | variant | behavior |
//! |---|---|
//! | `FixedValue` | returns what its producer returns |
//! | `InvocationHandler` | decides per call, sees proxy, method and arguments |
//! | `MethodInterceptor` | like a handler, plus a one-shot [`SuperMethod`] |
//! | `LazyLoader` | loads a delegate once per instance, then reuses it |
//! | `Dispatcher` | loads a delegate on every call |
//! | `ProxyRefDispatcher` | loads a delegate on every call, given the proxy |
//! | `NoOp` | runs the base implementation |
//!
//! Every trait has a blanket implementation for matching closures.

use crate::{error::BoxError, method::MethodDescriptor, target::Proxy, value::Value};
use std::{fmt, sync::Arc};

/// Produces a value (or a delegate) without any input.
pub trait Loader: Send + Sync + 'static {
    /// Produce the value.
    fn load(&self) -> Result<Value, BoxError>;
}

impl<F> Loader for F
where
    F: Fn() -> Result<Value, BoxError> + Send + Sync + 'static,
{
    fn load(&self) -> Result<Value, BoxError> {
        (self)()
    }
}

/// Produces a delegate given the proxy it is loaded for.
pub trait ProxyRefLoader: Send + Sync + 'static {
    /// Produce the delegate. Calling back into `proxy` is allowed and unguarded.
    fn load(&self, proxy: &dyn Proxy) -> Result<Value, BoxError>;
}

impl<F> ProxyRefLoader for F
where
    F: Fn(&dyn Proxy) -> Result<Value, BoxError> + Send + Sync + 'static,
{
    fn load(&self, proxy: &dyn Proxy) -> Result<Value, BoxError> {
        (self)(proxy)
    }
}

/// Handles every call routed to it.
///
/// Calling the same method on `proxy` from inside `invoke` recurses into this
/// handler again.
pub trait InvocationHandler: Send + Sync + 'static {
    /// Produce the result of `method`, or fail.
    fn invoke(
        &self,
        proxy: &dyn Proxy,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> Result<Value, BoxError>;
}

impl<F> InvocationHandler for F
where
    F: Fn(&dyn Proxy, &MethodDescriptor, &[Value]) -> Result<Value, BoxError>
        + Send
        + Sync
        + 'static,
{
    fn invoke(
        &self,
        proxy: &dyn Proxy,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> Result<Value, BoxError> {
        (self)(proxy, method, args)
    }
}

/// Wraps every call routed to it, with access to the base implementation.
pub trait MethodInterceptor: Send + Sync + 'static {
    /// Produce the result of `method`, optionally through `sup`.
    fn intercept(
        &self,
        proxy: &dyn Proxy,
        method: &MethodDescriptor,
        args: &[Value],
        sup: SuperMethod<'_>,
    ) -> Result<Value, BoxError>;
}

impl<F> MethodInterceptor for F
where
    F: Fn(&dyn Proxy, &MethodDescriptor, &[Value], SuperMethod<'_>) -> Result<Value, BoxError>
        + Send
        + Sync
        + 'static,
{
    fn intercept(
        &self,
        proxy: &dyn Proxy,
        method: &MethodDescriptor,
        args: &[Value],
        sup: SuperMethod<'_>,
    ) -> Result<Value, BoxError> {
        (self)(proxy, method, args, sup)
    }
}

/// One-shot access to the base implementation of the intercepted method.
///
/// [`invoke_super`](Self::invoke_super) consumes the capability.
pub struct SuperMethod<'a> {
    invoke: &'a (dyn Fn(&[Value]) -> Result<Value, BoxError> + 'a),
}

impl<'a> SuperMethod<'a> {
    /// Bind the capability to the base implementation.
    pub fn new(invoke: &'a (dyn Fn(&[Value]) -> Result<Value, BoxError> + 'a)) -> Self {
        Self { invoke }
    }

    /// Run the base implementation with `args`, bypassing every callback.
    pub fn invoke_super(self, args: &[Value]) -> Result<Value, BoxError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for SuperMethod<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SuperMethod")
    }
}

/// The fieldless tag of a [`Callback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    /// See [`Callback::FixedValue`].
    FixedValue,
    /// See [`Callback::InvocationHandler`].
    InvocationHandler,
    /// See [`Callback::MethodInterceptor`].
    MethodInterceptor,
    /// See [`Callback::LazyLoader`].
    LazyLoader,
    /// See [`Callback::Dispatcher`].
    Dispatcher,
    /// See [`Callback::ProxyRefDispatcher`].
    ProxyRefDispatcher,
    /// See [`Callback::NoOp`].
    NoOp,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A unit of behavior a proxy runs for the methods routed to it.
#[derive(Clone)]
pub enum Callback {
    /// Return the producer's value.
    FixedValue(Arc<dyn Loader>),
    /// Let the handler decide.
    InvocationHandler(Arc<dyn InvocationHandler>),
    /// Let the interceptor decide, with access to the base implementation.
    MethodInterceptor(Arc<dyn MethodInterceptor>),
    /// Load the delegate on first use and keep it for the instance's lifetime.
    LazyLoader(Arc<dyn Loader>),
    /// Load the delegate on every call.
    Dispatcher(Arc<dyn Loader>),
    /// Load the delegate on every call, handing the proxy to the loader.
    ProxyRefDispatcher(Arc<dyn ProxyRefLoader>),
    /// Run the base implementation.
    NoOp,
}

impl Callback {
    /// A callback returning whatever `producer` returns.
    pub fn fixed_value<F>(producer: F) -> Self
    where
        F: Fn() -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Callback::FixedValue(Arc::new(producer))
    }

    /// A callback always returning `value`.
    pub fn fixed(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::fixed_value(move || Ok(value.clone()))
    }

    /// A handler closure receiving the proxy, the method and its arguments.
    pub fn invocation_handler<F>(handler: F) -> Self
    where
        F: Fn(&dyn Proxy, &MethodDescriptor, &[Value]) -> Result<Value, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Callback::InvocationHandler(Arc::new(handler))
    }

    /// An interceptor closure that may run the base behavior once.
    pub fn interceptor<F>(interceptor: F) -> Self
    where
        F: Fn(&dyn Proxy, &MethodDescriptor, &[Value], SuperMethod<'_>) -> Result<Value, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Callback::MethodInterceptor(Arc::new(interceptor))
    }

    /// A loader run once per instance.
    pub fn lazy_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Callback::LazyLoader(Arc::new(loader))
    }

    /// A loader run on every call.
    pub fn dispatcher<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Callback::Dispatcher(Arc::new(loader))
    }

    /// A loader run on every call with the proxy itself.
    pub fn proxy_ref_dispatcher<F>(loader: F) -> Self
    where
        F: Fn(&dyn Proxy) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Callback::ProxyRefDispatcher(Arc::new(loader))
    }

    /// The tag of this callback.
    pub fn kind(&self) -> CallbackKind {
        match self {
            Callback::FixedValue(_) => CallbackKind::FixedValue,
            Callback::InvocationHandler(_) => CallbackKind::InvocationHandler,
            Callback::MethodInterceptor(_) => CallbackKind::MethodInterceptor,
            Callback::LazyLoader(_) => CallbackKind::LazyLoader,
            Callback::Dispatcher(_) => CallbackKind::Dispatcher,
            Callback::ProxyRefDispatcher(_) => CallbackKind::ProxyRefDispatcher,
            Callback::NoOp => CallbackKind::NoOp,
        }
    }

    /// Returns `true` if both callbacks are the same variant sharing the same behavior object.
    pub fn same_as(&self, other: &Callback) -> bool {
        match (self, other) {
            (Callback::FixedValue(a), Callback::FixedValue(b))
            | (Callback::LazyLoader(a), Callback::LazyLoader(b))
            | (Callback::Dispatcher(a), Callback::Dispatcher(b)) => Arc::ptr_eq(a, b),
            (Callback::InvocationHandler(a), Callback::InvocationHandler(b)) => Arc::ptr_eq(a, b),
            (Callback::MethodInterceptor(a), Callback::MethodInterceptor(b)) => Arc::ptr_eq(a, b),
            (Callback::ProxyRefDispatcher(a), Callback::ProxyRefDispatcher(b)) => {
                Arc::ptr_eq(a, b)
            }
            (Callback::NoOp, Callback::NoOp) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback::{}", self.kind())
    }
}

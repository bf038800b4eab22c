//! # proxen-core
//!
//! Core types for the Proxen proxy dispatch framework.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that writes callbacks or proxiable types without needing the router
//! itself (`proxen-std`).
//!
//! # Model
//!
//! A proxy extends a base type. Every call on the proxy is routed:
//!
//! 1. The [`RoutingPolicy`] maps the [`MethodDescriptor`] to an index.
//! 2. The [`Callback`] at that index decides what the call does: return a
//!    fixed value, ask a handler, wrap the base implementation, or forward
//!    to a (lazily) loaded delegate.
//! 3. Results travel as [`Value`]s and are checked against the method's
//!    declared [`ReturnKind`].
//!
//! Objects that can be invoked by descriptor implement [`Target`]; types
//! that can serve as a proxy base also implement [`Class`].
//!
//! # Error Types
//!
//! - [`ProxyError`] - Top-level error type
//! - [`ConfigurationError`] - Bad setup, detected before any instance exists
//! - [`DispatchError`] - Failures of a single call
//! - [`GenerateError`] - Failures of the type generators

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod error;
mod method;
pub mod object;
mod policy;
mod target;
mod value;

// Re-exports
pub use callback::{
    Callback, CallbackKind, InvocationHandler, Loader, MethodInterceptor, ProxyRefLoader,
    SuperMethod,
};
pub use error::{
    BoxError, ConfigurationError, DispatchError, GenerateError, MismatchReason, ProxyError,
    ValueTypeError,
};
pub use method::{
    MethodDescriptor, MethodFlags, OBJECT, TypeDescriptor, TypeDescriptorBuilder, TypeFlags,
    object_methods,
};
pub use policy::{RoutingPolicy, SingleCallback};
pub use target::{BaseType, Class, Proxy, Target};
pub use value::{FromValue, IntoValue, ObjectRef, ReturnKind, Value, ValueKind};

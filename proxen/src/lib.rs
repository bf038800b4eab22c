//! # proxen - Runtime Proxies with Pluggable Callbacks
//!
//! `proxen` generates stand-in objects (proxies) for a base type. Every call
//! on a proxy is routed through a [`RoutingPolicy`] to one of a fixed set of
//! [`Callback`]s, which return a constant, ask a handler, wrap the base
//! implementation, or forward to a loaded delegate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use proxen::prelude::*;
//!
//! #[derive(Default)]
//! struct TestClass;
//!
//! #[proxen::target]
//! impl TestClass {
//!     pub fn test(&self) -> String {
//!         "Hello world!".to_owned()
//!     }
//! }
//!
//! let proxy = Enhancer::new()
//!     .superclass::<TestClass>()
//!     .callbacks([Callback::NoOp, Callback::fixed("Not acceptable method!")])
//!     .callback_filter(NamePolicy::new(1).route("test", 0))
//!     .create()?;
//!
//! assert_eq!(proxy.call("test", &[])?, Value::text("Hello world!"));
//! ```
//!
//! ## Features
//!
//! - `macros` (default): `#[proxen::target]`
//! - `tracing` (default): debug and trace events from configuration and dispatch
//! - `phf`: [`StaticNamePolicy`], a compile-time method name table

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use proxen_core::{
    // Types
    BaseType,
    // Error types
    BoxError,
    // Callbacks
    Callback,
    CallbackKind,
    Class,
    ConfigurationError,
    DispatchError,
    // Values
    FromValue,
    GenerateError,
    IntoValue,
    InvocationHandler,
    Loader,
    // Descriptors
    MethodDescriptor,
    MethodFlags,
    MethodInterceptor,
    MismatchReason,
    OBJECT,
    ObjectRef,
    Proxy,
    ProxyError,
    ProxyRefLoader,
    ReturnKind,
    // Routing
    RoutingPolicy,
    SingleCallback,
    SuperMethod,
    Target,
    TypeDescriptor,
    TypeDescriptorBuilder,
    TypeFlags,
    Value,
    ValueKind,
    ValueTypeError,
    object,
    object_methods,
};

// Proxies
pub use proxen_std::proxy::{
    Enhancer, GeneratedType, ProxyConfig, ProxyInstance, bind_callbacks, configure,
    create_instance, generate_proxy_type,
};

// Registries and policies
pub use proxen_std::{
    policy::{CallbackHelper, HelperPolicy, NamePolicy},
    registry::{CallbackRegistry, RegistryBuilder},
};

#[cfg(feature = "phf")]
pub use proxen_std::policy::StaticNamePolicy;

// Generators
pub use proxen_std::{
    bean::{Bean, BeanGenerator, PropertyTypeError, RecordType, generate_record_type},
    mixin::{Mixin, compose_interfaces},
};

/// Routing policies.
pub mod policy {
    #![allow(clippy::wildcard_imports)]
    pub use proxen_std::policy::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use proxen_std::testing::*;
}

/// Prelude module - common imports for Proxen.
///
/// # Usage
///
/// ```rust,ignore
/// use proxen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Callbacks
        Callback,
        Class,
        DispatchError,
        // Builders
        Enhancer,
        MethodDescriptor,
        NamePolicy,
        // Core traits
        Proxy,
        ProxyError,
        ReturnKind,
        RoutingPolicy,
        SuperMethod,
        Target,
        TypeDescriptor,
        Value,
    };
}

#[cfg(feature = "macros")]
pub use proxen_macros::target;

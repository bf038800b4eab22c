//! Proxy generation and call dispatch.
//!
//! The flow mirrors how the pieces depend on each other:
//!
//! 1. [`generate_proxy_type`] turns a [`BaseType`] into a [`GeneratedType`]
//!    (sealed types are rejected).
//! 2. [`configure`] validates callbacks and policy against it, producing a
//!    [`ProxyConfig`].
//! 3. [`ProxyConfig::create_instance`] allocates a [`ProxyInstance`].
//! 4. [`Proxy::dispatch`] routes each call.
//!
//! [`Enhancer`] runs steps 1-3 from a builder; [`bind_callbacks`] runs 2-3.
//!
//! [`BaseType`]: proxen_core::BaseType
//! [`Proxy::dispatch`]: proxen_core::Proxy::dispatch

mod config;
mod enhancer;
mod generate;
mod instance;
mod lazy;

pub use config::{ProxyConfig, configure};
pub use enhancer::Enhancer;
pub use generate::{GeneratedType, bind_callbacks, generate_proxy_type};
pub use instance::ProxyInstance;

/// Allocate a fresh instance of `config`.
pub fn create_instance(config: &ProxyConfig) -> ProxyInstance {
    config.create_instance()
}

//! # proxen-std
//!
//! Standard implementations for the Proxen proxy dispatch framework.
//!
//! This crate provides:
//! - **Proxies**: [`proxy::Enhancer`], [`proxy::configure`], [`proxy::ProxyInstance`]
//! - **Registries**: [`registry::CallbackRegistry`]
//! - **Routing policies**: name tables and [`policy::CallbackHelper`]
//! - **Generators**: record types ([`bean`]) and interface composition ([`mixin`])
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use proxen_core;

// Modules
pub mod bean;
pub mod mixin;
pub mod policy;
pub mod proxy;
pub mod registry;
pub mod testing;

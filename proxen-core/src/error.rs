//! Error types for Proxen.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`ProxyError`] - Top-level error type for all Proxen operations
//! - [`ConfigurationError`] - Problems detected while configuring a proxy
//! - [`DispatchError`] - Failures of a single proxied call
//! - [`GenerateError`] - Failures of the type generators (proxy, bean, mixin)

use crate::{
    callback::CallbackKind,
    value::{ReturnKind, ValueKind},
};
use thiserror::Error;

/// A boxed error type for failures raised by user callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Proxen operations.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The proxy could not be configured.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A proxied call failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A type could not be generated.
    #[error("generate error: {0}")]
    Generate(#[from] GenerateError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors detected eagerly, before any proxy instance exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No callbacks were registered.
    #[error("callback registry is empty")]
    EmptyRegistry,

    /// Several callbacks were registered without a policy to choose between them.
    #[error("{count} callbacks registered but no routing policy supplied")]
    MissingPolicy {
        /// Number of registered callbacks.
        count: usize,
    },

    /// The policy routes a known method outside the registry.
    #[error("policy routes `{method}` to callback {index}, but only {len} are registered")]
    RouteOutOfRange {
        /// The offending method.
        method: String,
        /// The index returned by the policy.
        index: usize,
        /// Registry length.
        len: usize,
    },

    /// No base type was given to the builder.
    #[error("no base type set")]
    MissingBaseType,
}

/// Errors raised by an individual call on a proxy or composite.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The routing policy returned an index outside the registry.
    #[error("policy routed `{method}` to callback {index}, but only {len} are registered")]
    Routing {
        /// The dispatched method.
        method: String,
        /// The index returned by the policy.
        index: usize,
        /// Registry length.
        len: usize,
    },

    /// A handler, interceptor, loader or base implementation failed.
    #[error("callback for `{method}` failed")]
    Handler {
        /// The dispatched method.
        method: String,
        /// The original failure.
        #[source]
        source: BoxError,
    },

    /// The callback result does not fit the calling convention of the method.
    #[error("`{method}` cannot be served by {callback}: {reason}")]
    SemanticMismatch {
        /// The dispatched method.
        method: String,
        /// The callback kind that produced the result.
        callback: CallbackKind,
        /// Why the result was rejected.
        reason: MismatchReason,
    },

    /// The method is not part of the receiver's type.
    #[error("`{method}` is not declared by `{owner}`")]
    UnknownMethod {
        /// The receiver's type name.
        owner: String,
        /// The requested method.
        method: String,
    },

    /// Wrong number of arguments.
    #[error("`{method}` expects {expected} arguments, got {found}")]
    Arity {
        /// The dispatched method.
        method: String,
        /// Declared arity.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },
}

impl DispatchError {
    /// Wraps a callback failure raised while serving `method`.
    pub fn handler(method: impl ToString, source: BoxError) -> Self {
        DispatchError::Handler {
            method: method.to_string(),
            source,
        }
    }
}

/// Why a callback result was rejected with [`DispatchError::SemanticMismatch`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// A constant was produced for an operation that needs per-instance results.
    #[error("identity-sensitive operations need per-instance results")]
    IdentitySensitive,

    /// The produced value does not match the declared return kind.
    #[error("declared to return {expected}, callback produced {found}")]
    ReturnType {
        /// Declared return kind.
        expected: ReturnKind,
        /// Kind of the produced value.
        found: ValueKind,
    },
}

/// Errors raised by the type generators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The base type is sealed and cannot be extended.
    #[error("cannot extend sealed type `{0}`")]
    UnsupportedBaseType(String),

    /// A record property was declared twice.
    #[error("property `{0}` declared twice")]
    DuplicateProperty(String),

    /// A record property name is not a valid identifier.
    #[error("invalid property name `{0}`")]
    InvalidPropertyName(String),

    /// A record property was declared with a kind that cannot hold values.
    #[error("property `{0}` cannot be void")]
    InvalidPropertyType(String),

    /// The same interface was supplied twice to a mixin.
    #[error("interface `{0}` supplied twice")]
    DuplicateInterface(String),

    /// A method of a combined interface has no implementor in the mixin.
    #[error("method `{method}` of `{interface}` has no implementor")]
    MissingImplementation {
        /// The interface being checked.
        interface: String,
        /// The uncovered method.
        method: String,
    },
}

/// A [`Value`](crate::Value) could not be converted into the requested Rust type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct ValueTypeError {
    /// The requested type.
    pub expected: &'static str,
    /// Kind of the supplied value.
    pub found: ValueKind,
}

// Convenience conversions
impl From<BoxError> for ProxyError {
    fn from(err: BoxError) -> Self {
        ProxyError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(fail: bool) -> Result<(), BoxError> {
        if fail { Err("backend unavailable".into()) } else { Ok(()) }
    }

    fn setup(fail: bool) -> Result<(), ProxyError> {
        load(fail)?;
        Err(ConfigurationError::EmptyRegistry.into())
    }

    #[test]
    fn user_failures_become_custom() {
        let err = setup(true).unwrap_err();
        assert!(matches!(err, ProxyError::Custom(_)));
        assert_eq!(err.to_string(), "backend unavailable");
    }

    #[test]
    fn sub_errors_keep_their_variant() {
        let err = setup(false).unwrap_err();
        assert!(matches!(
            err,
            ProxyError::Configuration(ConfigurationError::EmptyRegistry)
        ));
        assert_eq!(err.to_string(), "configuration error: callback registry is empty");
    }
}

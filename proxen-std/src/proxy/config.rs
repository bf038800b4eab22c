//! Proxy configuration.

use super::{generate::GeneratedType, instance::ProxyInstance};
use crate::registry::CallbackRegistry;
use proxen_core::{ConfigurationError, RoutingPolicy, SingleCallback};
use std::{fmt, sync::Arc};

/// A validated pairing of generated type, callbacks and routing policy.
///
/// Cheap to clone; every instance created from it shares the callbacks.
#[derive(Clone)]
pub struct ProxyConfig {
    generated: GeneratedType,
    callbacks: CallbackRegistry,
    policy: Arc<dyn RoutingPolicy>,
}

impl ProxyConfig {
    /// The generated type instances are created from.
    /// The proxy type this configuration binds.
    pub fn generated(&self) -> &GeneratedType {
        &self.generated
    }

    /// Callbacks in registration order.
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Maps each method to a callback index.
    pub fn policy(&self) -> &dyn RoutingPolicy {
        &*self.policy
    }

    /// Allocate a fresh instance with every lazy slot empty.
    pub fn create_instance(&self) -> ProxyInstance {
        ProxyInstance::new(self.clone())
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("generated", &self.generated.name())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

/// Validate and assemble a proxy configuration.
///
/// Without a policy, a single callback serves every method. Every non-final
/// method known now must route inside the registry; methods only seen at
/// call time are checked when dispatched.
pub fn configure(
    generated: &GeneratedType,
    callbacks: CallbackRegistry,
    policy: Option<Arc<dyn RoutingPolicy>>,
) -> Result<ProxyConfig, ConfigurationError> {
    if callbacks.is_empty() {
        return Err(ConfigurationError::EmptyRegistry);
    }

    let policy: Arc<dyn RoutingPolicy> = match policy {
        Some(policy) => policy,
        None if callbacks.len() == 1 => Arc::new(SingleCallback),
        None => {
            return Err(ConfigurationError::MissingPolicy {
                count: callbacks.len(),
            });
        }
    };

    for method in generated.descriptor().methods().iter().filter(|m| !m.is_final()) {
        let index = policy.accept(method);
        if index >= callbacks.len() {
            return Err(ConfigurationError::RouteOutOfRange {
                method: method.to_string(),
                index,
                len: callbacks.len(),
            });
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        generated = %generated.name(),
        callbacks = callbacks.len(),
        "configured proxy"
    );

    Ok(ProxyConfig {
        generated: generated.clone(),
        callbacks,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::generate::generate_proxy_type;
    use proxen_core::{
        BaseType, BoxError, Callback, MethodDescriptor, ReturnKind, Target, TypeDescriptor, Value,
    };

    struct Empty;

    impl Target for Empty {
        fn invoke(&self, _: &MethodDescriptor, _: &[Value]) -> Result<Value, BoxError> {
            Ok(Value::Null)
        }
    }

    fn generated() -> GeneratedType {
        let descriptor = TypeDescriptor::class("Empty")
            .method("run", ReturnKind::Void, 0)
            .final_method("locked", ReturnKind::Void, 0)
            .build();
        generate_proxy_type(BaseType::new(descriptor, || Arc::new(Empty) as Arc<dyn Target>))
            .unwrap()
    }

    #[test]
    fn empty_registry_is_rejected() {
        let err = configure(&generated(), CallbackRegistry::from(vec![]), None).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyRegistry);
    }

    #[test]
    fn several_callbacks_need_a_policy() {
        let callbacks = CallbackRegistry::from(vec![Callback::NoOp, Callback::fixed("x")]);
        let err = configure(&generated(), callbacks, None).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingPolicy { count: 2 });
    }

    #[test]
    fn single_callback_needs_no_policy() {
        let config = configure(&generated(), CallbackRegistry::single(Callback::NoOp), None);
        assert!(config.is_ok());
    }

    #[test]
    fn out_of_range_routes_fail_eagerly() {
        let callbacks = CallbackRegistry::from(vec![Callback::NoOp, Callback::fixed("x")]);
        let policy: Arc<dyn RoutingPolicy> =
            Arc::new(|m: &MethodDescriptor| -> usize { if m.name() == "run" { 2 } else { 0 } });

        let err = configure(&generated(), callbacks, Some(policy)).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::RouteOutOfRange { index: 2, len: 2, .. }
        ));
    }

    #[test]
    fn final_methods_are_not_validated() {
        let callbacks = CallbackRegistry::single(Callback::NoOp);
        let policy: Arc<dyn RoutingPolicy> =
            Arc::new(|m: &MethodDescriptor| -> usize { if m.name() == "locked" { 9 } else { 0 } });

        assert!(configure(&generated(), callbacks, Some(policy)).is_ok());
    }
}

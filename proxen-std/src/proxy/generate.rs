//! Proxy type generation.

use super::{config::configure, instance::ProxyInstance};
use crate::registry::CallbackRegistry;
use proxen_core::{BaseType, ConfigurationError, GenerateError, RoutingPolicy, TypeDescriptor};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// Handle to a generated proxy type: the extended base type plus a unique name.
#[derive(Clone, Debug)]
pub struct GeneratedType {
    base: BaseType,
    name: Arc<str>,
}

impl GeneratedType {
    /// Name of the generated type, `{base}$$Proxy$${seq}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The extended base type.
    pub fn base(&self) -> &BaseType {
        &self.base
    }

    /// Descriptor of the extended base type.
    pub fn descriptor(&self) -> &TypeDescriptor {
        self.base.descriptor()
    }
}

/// Generate a proxy type extending `base`.
///
/// Fails with [`GenerateError::UnsupportedBaseType`] if `base` is sealed.
pub fn generate_proxy_type(base: BaseType) -> Result<GeneratedType, GenerateError> {
    if base.descriptor().is_sealed() {
        return Err(GenerateError::UnsupportedBaseType(base.name().to_owned()));
    }

    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let name: Arc<str> = format!("{}$$Proxy$${seq:x}", base.name()).into();

    #[cfg(feature = "tracing")]
    tracing::debug!(base = %base.name(), generated = %name, "generated proxy type");

    Ok(GeneratedType { base, name })
}

/// Configure `generated` with `callbacks` and `policy`, then create an instance.
pub fn bind_callbacks<P: RoutingPolicy>(
    generated: &GeneratedType,
    callbacks: CallbackRegistry,
    policy: P,
) -> Result<ProxyInstance, ConfigurationError> {
    let config = configure(generated, callbacks, Some(Arc::new(policy)))?;
    Ok(config.create_instance())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxen_core::{BoxError, MethodDescriptor, ReturnKind, Target, Value};

    struct Empty;

    impl Target for Empty {
        fn invoke(&self, _: &MethodDescriptor, _: &[Value]) -> Result<Value, BoxError> {
            Ok(Value::Null)
        }
    }

    fn base(sealed: bool) -> BaseType {
        let builder = TypeDescriptor::class("Empty").method("run", ReturnKind::Void, 0);
        let builder = if sealed { builder.sealed() } else { builder };
        BaseType::new(builder.build(), || Arc::new(Empty) as Arc<dyn Target>)
    }

    #[test]
    fn generated_names_are_unique() {
        let a = generate_proxy_type(base(false)).unwrap();
        let b = generate_proxy_type(base(false)).unwrap();

        assert!(a.name().starts_with("Empty$$Proxy$$"));
        assert_ne!(a.name(), b.name());
        assert_eq!(a.descriptor().name(), "Empty");
    }

    #[test]
    fn sealed_types_are_rejected() {
        let err = generate_proxy_type(base(true)).unwrap_err();
        assert_eq!(err, GenerateError::UnsupportedBaseType("Empty".into()));
    }
}

//! Proxy instances and the dispatch algorithm.

use super::{config::ProxyConfig, lazy::LazySlots};
use proxen_core::{
    BoxError, Callback, CallbackKind, DispatchError, InvocationHandler, Loader,
    MethodDescriptor, MethodInterceptor, MismatchReason, Proxy, ProxyRefLoader, ReturnKind,
    SuperMethod, Target, TypeDescriptor, Value, object,
};
use std::{fmt, sync::Arc};

/// A generated stand-in for the base type.
///
/// Holds its own base state (built by the base type's constructor) and one
/// lazy slot per callback. Clones are handles to the same instance.
#[derive(Clone)]
pub struct ProxyInstance {
    inner: Arc<Inner>,
}

struct Inner {
    config: ProxyConfig,
    base: Arc<dyn Target>,
    slots: LazySlots,
}

impl ProxyInstance {
    pub(crate) fn new(config: ProxyConfig) -> Self {
        let base = config.generated().base().construct();
        let slots = LazySlots::new(config.callbacks().len());

        #[cfg(feature = "tracing")]
        tracing::debug!(generated = %config.generated().name(), "created proxy instance");

        Self {
            inner: Arc::new(Inner {
                config,
                base,
                slots,
            }),
        }
    }

    /// The configuration this instance was created from.
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Returns `true` once the lazy loader at `index` has filled its slot.
    pub fn is_loaded(&self, index: usize) -> bool {
        self.inner.slots.is_filled(index)
    }

    /// Returns `true` if both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Wrap this instance as an invocable [`Value`].
    pub fn into_value(self) -> Value {
        Value::Instance(Arc::new(self))
    }

    /// Base behavior: the base type's own implementation, or the root-object
    /// default for inherited methods. Never routed through callbacks.
    fn invoke_base(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        if method.is_inherited() {
            return Ok(object::invoke_root(
                self.object_id(),
                self.type_name(),
                method,
                args,
            )?);
        }
        self.inner.base.invoke(method, args)
    }

    fn run(
        &self,
        index: usize,
        callback: &Callback,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> Result<Value, DispatchError> {
        let failed = |source: BoxError| DispatchError::handler(method, source);

        match callback {
            Callback::FixedValue(producer) => {
                let value = producer.load().map_err(failed)?;
                if method.is_identity_sensitive() {
                    return Err(DispatchError::SemanticMismatch {
                        method: method.to_string(),
                        callback: CallbackKind::FixedValue,
                        reason: MismatchReason::IdentitySensitive,
                    });
                }
                Ok(value)
            }
            Callback::InvocationHandler(handler) => {
                handler.invoke(self, method, args).map_err(failed)
            }
            Callback::MethodInterceptor(interceptor) => {
                let base = |args: &[Value]| self.invoke_base(method, args);
                interceptor
                    .intercept(self, method, args, SuperMethod::new(&base))
                    .map_err(failed)
            }
            Callback::LazyLoader(loader) => {
                let slot = self.inner.slots.get(index).ok_or_else(|| DispatchError::Routing {
                    method: method.to_string(),
                    index,
                    len: self.inner.config.callbacks().len(),
                })?;
                let delegate = slot
                    .get_or_try_init(|| {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(method = %method, index, "filling lazy slot");
                        loader.load()
                    })
                    .map_err(failed)?;
                self.forward(CallbackKind::LazyLoader, delegate, method, args)
            }
            Callback::Dispatcher(loader) => {
                let delegate = loader.load().map_err(failed)?;
                self.forward(CallbackKind::Dispatcher, &delegate, method, args)
            }
            Callback::ProxyRefDispatcher(loader) => {
                let delegate = loader.load(self).map_err(failed)?;
                self.forward(CallbackKind::ProxyRefDispatcher, &delegate, method, args)
            }
            Callback::NoOp => self.invoke_base(method, args).map_err(failed),
        }
    }

    /// Invocable delegates receive the call; anything else is the result itself.
    ///
    /// A plain value cannot answer an identity-sensitive method for this proxy.
    fn forward(
        &self,
        kind: CallbackKind,
        delegate: &Value,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> Result<Value, DispatchError> {
        match delegate {
            Value::Instance(target) => target
                .invoke(method, args)
                .map_err(|source| DispatchError::handler(method, source)),
            _ if method.is_identity_sensitive() => Err(DispatchError::SemanticMismatch {
                method: method.to_string(),
                callback: kind,
                reason: MismatchReason::IdentitySensitive,
            }),
            other => Ok(other.clone()),
        }
    }
}

/// Check a result against the method's declared return kind.
fn conform(
    method: &MethodDescriptor,
    callback: CallbackKind,
    value: Value,
) -> Result<Value, DispatchError> {
    match method.returns() {
        ReturnKind::Void => Ok(Value::Null),
        returns if returns.accepts(&value) => Ok(value),
        expected => Err(DispatchError::SemanticMismatch {
            method: method.to_string(),
            callback,
            reason: MismatchReason::ReturnType {
                expected,
                found: value.kind(),
            },
        }),
    }
}

impl Proxy for ProxyInstance {
    fn type_name(&self) -> &str {
        self.inner.config.generated().name()
    }

    fn descriptor(&self) -> &TypeDescriptor {
        self.inner.config.generated().descriptor()
    }

    fn dispatch(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, DispatchError> {
        if args.len() != method.arity() {
            return Err(DispatchError::Arity {
                method: method.to_string(),
                expected: method.arity(),
                found: args.len(),
            });
        }

        if method.is_final() {
            #[cfg(feature = "tracing")]
            tracing::trace!(method = %method, "final method, running base");
            let value = self
                .invoke_base(method, args)
                .map_err(|source| DispatchError::handler(method, source))?;
            return conform(method, CallbackKind::NoOp, value);
        }

        let callbacks = self.inner.config.callbacks();
        let index = self.inner.config.policy().accept(method);
        let callback = callbacks.get(index).ok_or_else(|| DispatchError::Routing {
            method: method.to_string(),
            index,
            len: callbacks.len(),
        })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(method = %method, index, callback = %callback.kind(), "dispatching");

        let value = self.run(index, callback, method, args)?;
        conform(method, callback.kind(), value)
    }
}

impl Target for ProxyInstance {
    fn invoke(&self, method: &MethodDescriptor, args: &[Value]) -> Result<Value, BoxError> {
        self.dispatch(method, args).map_err(Into::into)
    }

    fn object_id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl fmt::Debug for ProxyInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyInstance")
            .field("type_name", &self.type_name())
            .field("object_id", &format_args!("{:#x}", self.object_id()))
            .finish_non_exhaustive()
    }
}

//! Builder for proxies.

use super::{
    config::{ProxyConfig, configure},
    generate::generate_proxy_type,
    instance::ProxyInstance,
};
use crate::{policy::CallbackHelper, registry::CallbackRegistry};
use proxen_core::{BaseType, Callback, Class, ConfigurationError, ProxyError, RoutingPolicy};
use std::sync::Arc;

/// Builder tying a base type, its callbacks and a routing policy together.
///
/// # Example
///
/// ```rust,ignore
/// let proxy = Enhancer::new()
///     .superclass::<TestClass>()
///     .callback(Callback::fixed("Hello proxy!"))
///     .create()?;
///
/// assert_eq!(proxy.call("test", &[])?, Value::text("Hello proxy!"));
/// ```
#[derive(Default)]
pub struct Enhancer {
    base: Option<BaseType>,
    callbacks: Vec<Callback>,
    policy: Option<Arc<dyn RoutingPolicy>>,
}

impl Enhancer {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the [`Class`] `C`.
    pub fn superclass<C: Class>(self) -> Self {
        self.base_type(BaseType::of::<C>())
    }

    /// Extend a type-erased base type.
    pub fn base_type(mut self, base: BaseType) -> Self {
        self.base = Some(base);
        self
    }

    /// Serve every method with a single callback.
    pub fn callback(mut self, callback: Callback) -> Self {
        self.callbacks = vec![callback];
        self
    }

    /// Replace the callbacks; a policy picks among them by index.
    pub fn callbacks<I>(mut self, callbacks: I) -> Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.callbacks = callbacks.into_iter().collect();
        self
    }

    /// Set the routing policy.
    pub fn callback_filter<P: RoutingPolicy>(mut self, policy: P) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Take both callbacks and policy from a [`CallbackHelper`].
    pub fn callback_helper(self, helper: CallbackHelper) -> Self {
        let (callbacks, policy) = helper.into_parts();
        self.callbacks(callbacks.iter().cloned())
            .callback_filter(policy)
    }

    /// Generate the proxy type and validate the configuration.
    ///
    /// Every call generates a fresh type.
    pub fn build(&self) -> Result<ProxyConfig, ProxyError> {
        let base = self
            .base
            .clone()
            .ok_or(ConfigurationError::MissingBaseType)?;
        let generated = generate_proxy_type(base)?;
        let callbacks = CallbackRegistry::from(self.callbacks.clone());
        Ok(configure(&generated, callbacks, self.policy.clone())?)
    }

    /// Build and create a single instance.
    pub fn create(&self) -> Result<ProxyInstance, ProxyError> {
        Ok(self.build()?.create_instance())
    }
}
